//! Record sources: generator, HTTP record endpoint and delimited files.

use crate::domain::Candidate;
use crate::error::{PipelineError, Result};
use async_trait::async_trait;

pub mod api;
pub mod csv_file;
pub mod generator;
pub mod products;

pub use api::ApiSource;
pub use csv_file::{CsvSource, FieldMapping};
pub use generator::RecordGenerator;
pub use products::{Product, ProductSource};

/// A recoverable problem met while producing candidates (e.g. a skipped row).
#[derive(Debug)]
pub struct SourceIssue {
    pub error: PipelineError,
}

/// Candidates in source order, plus the problems that did not stop the source.
#[derive(Debug, Default)]
pub struct SourceBatch {
    pub candidates: Vec<Candidate>,
    pub issues: Vec<SourceIssue>,
}

impl SourceBatch {
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            issues: Vec::new(),
        }
    }
}

/// Produces a finite, ordered sequence of candidates. Never touches a sink.
#[async_trait]
pub trait RecordSource: Send {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Produces the whole batch.
    ///
    /// # Errors
    ///
    /// Only for failures that make the whole source unusable (unreadable file,
    /// missing header). Row-level problems are reported in [`SourceBatch::issues`].
    async fn produce(&mut self) -> Result<SourceBatch>;
}
