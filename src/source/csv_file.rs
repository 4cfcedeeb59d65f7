//! Delimited-file decoding.
//!
//! The first row is the header; every following row becomes one candidate. Rows with
//! the wrong number of fields are skipped and reported, never fatal.

use crate::domain::Candidate;
use crate::error::{PipelineError, Result};
use crate::source::{RecordSource, SourceBatch, SourceIssue};
use async_trait::async_trait;
use std::io::Read;
use std::path::PathBuf;

/// Which header names feed which record field (matched case-insensitively).
#[derive(Debug, Clone)]
pub struct FieldMapping {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    pub numeric: Vec<String>,
}

impl Default for FieldMapping {
    fn default() -> Self {
        let names = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect();
        Self {
            primary: names(&["primary_text", "name", "title"]),
            secondary: names(&["secondary_text", "email", "author"]),
            numeric: names(&["numeric_attribute", "publication_year", "year"]),
        }
    }
}

/// Column positions resolved from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    primary: Option<usize>,
    secondary: Option<usize>,
    numeric: Option<usize>,
}

impl FieldMapping {
    fn resolve(&self, header: &csv::StringRecord) -> Columns {
        let find = |aliases: &[String]| {
            header.iter().position(|h| {
                let h = h.trim().trim_start_matches('\u{feff}');
                aliases.iter().any(|a| a.eq_ignore_ascii_case(h))
            })
        };
        Columns {
            primary: find(&self.primary),
            secondary: find(&self.secondary),
            numeric: find(&self.numeric),
        }
    }
}

/// Decodes comma-separated UTF-8 text into candidates.
pub fn decode<R: Read>(input: R, mapping: &FieldMapping) -> Result<SourceBatch> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut rows = reader.records();

    let header = match rows.next() {
        Some(Ok(header)) if header.iter().any(|h| !h.trim().is_empty()) => header,
        Some(Err(e)) => {
            return Err(PipelineError::Format {
                line: 1,
                reason: format!("unreadable header: {}", e),
            })
        }
        _ => {
            return Err(PipelineError::Format {
                line: 1,
                reason: "missing header row".to_string(),
            })
        }
    };

    let columns = mapping.resolve(&header);
    if columns.primary.is_none() && columns.secondary.is_none() {
        return Err(PipelineError::Format {
            line: 1,
            reason: format!(
                "header {:?} names neither a primary nor a secondary column",
                header.iter().collect::<Vec<_>>()
            ),
        });
    }
    tracing::debug!(header = ?header.iter().collect::<Vec<_>>(), "detected columns");

    let mut batch = SourceBatch::default();
    let mut line: u64 = 1;
    for row in rows {
        line += 1;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                if let Some(pos) = e.position() {
                    line = pos.line();
                }
                batch.issues.push(SourceIssue {
                    error: PipelineError::Format {
                        line,
                        reason: e.to_string(),
                    },
                });
                continue;
            }
        };
        if let Some(pos) = row.position() {
            line = pos.line();
        }
        match decode_row(&row, columns, header.len()) {
            Ok(candidate) => batch.candidates.push(candidate),
            Err(reason) => batch.issues.push(SourceIssue {
                error: PipelineError::Format { line, reason },
            }),
        }
    }
    Ok(batch)
}

fn decode_row(
    row: &csv::StringRecord,
    columns: Columns,
    expected_fields: usize,
) -> std::result::Result<Candidate, String> {
    if row.len() != expected_fields {
        return Err(format!(
            "expected {} fields, found {}: {:?}",
            expected_fields,
            row.len(),
            row.iter().collect::<Vec<_>>()
        ));
    }
    let text = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(str::to_string);
    let numeric = match columns.numeric.and_then(|i| row.get(i)).map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<i64>()
                .map_err(|_| format!("'{}' is not an integer", raw))?,
        ),
    };
    Ok(Candidate {
        primary_text: text(columns.primary),
        secondary_text: text(columns.secondary),
        numeric_attribute: numeric,
    })
}

/// A [`RecordSource`] reading one CSV file, consumed once, fully, in order.
pub struct CsvSource {
    path: PathBuf,
    mapping: FieldMapping,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mapping: FieldMapping::default(),
        }
    }

    pub fn with_mapping(mut self, mapping: FieldMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl RecordSource for CsvSource {
    fn name(&self) -> &str {
        "csv"
    }

    async fn produce(&mut self) -> Result<SourceBatch> {
        let bytes = tokio::fs::read(&self.path).await?;
        tracing::info!(path = %self.path.display(), "reading CSV file");
        decode(bytes.as_slice(), &self.mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Result<SourceBatch> {
        decode(text.as_bytes(), &FieldMapping::default())
    }

    #[test]
    fn decodes_name_email_rows() {
        let batch = run("name,email\nAnn,ann@example.com\nBob,bob@example.com\n").unwrap();
        assert_eq!(batch.candidates.len(), 2);
        assert_eq!(
            batch.candidates[1],
            Candidate::new("Bob", "bob@example.com", None)
        );
        assert!(batch.issues.is_empty());
    }

    #[test]
    fn empty_input_is_a_format_error() {
        let err = run("").unwrap_err();
        assert!(matches!(err, PipelineError::Format { line: 1, .. }));
    }

    #[test]
    fn unknown_header_is_a_format_error() {
        let err = run("foo,bar\n1,2\n").unwrap_err();
        assert!(matches!(err, PipelineError::Format { line: 1, .. }));
    }

    #[test]
    fn wrong_field_count_skips_row() {
        let batch = run("name,email\nAnn,ann@example.com,extra\nBob,bob@example.com\nCarl\n").unwrap();
        assert_eq!(batch.candidates.len(), 1);
        assert_eq!(batch.issues.len(), 2);
        match &batch.issues[0].error {
            PipelineError::Format { line, reason } => {
                assert_eq!(*line, 2);
                assert!(reason.contains("expected 2 fields, found 3"), "{reason}");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(batch.issues[1].error, PipelineError::Format { line: 4, .. }));
    }

    #[test]
    fn header_order_and_case_do_not_matter() {
        let batch = run("Year,Author,Title\n1920,Jane Austen,The Iron Gate\n,Dan Brown,River of Stars\n").unwrap();
        assert_eq!(
            batch.candidates,
            vec![
                Candidate::new("The Iron Gate", "Jane Austen", Some(1920)),
                Candidate::new("River of Stars", "Dan Brown", None),
            ]
        );
    }

    #[test]
    fn non_integer_numeric_skips_row() {
        let batch = run("title,author,year\nA,B,soon\nC,D,1999\n").unwrap();
        assert_eq!(batch.candidates.len(), 1);
        assert_eq!(batch.issues.len(), 1);
    }

    #[test]
    fn missing_column_yields_missing_field() {
        let batch = run("email\nann@example.com\n").unwrap();
        assert_eq!(batch.candidates[0].primary_text, None);
    }
}
