//! The record pipeline driver.
//!
//! Candidates flow Source -> Validator -> Sink strictly one at a time. Rejections,
//! duplicates and skipped source rows are logged and counted; a storage failure
//! aborts the run and is returned to the caller (records committed before it stay).

use crate::domain::{validate, Candidate};
use crate::error::{PipelineError, Result};
use crate::source::RecordSource;
use crate::storage::RecordSink;
use std::fmt;

/// Counts for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub candidates: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub duplicates: usize,
    pub source_issues: usize,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "accepted {} of {} candidates ({} rejected, {} duplicates, {} source issues)",
            self.accepted, self.candidates, self.rejected, self.duplicates, self.source_issues
        )
    }
}

pub struct RecordPipeline<'a> {
    sink: &'a dyn RecordSink,
}

impl<'a> RecordPipeline<'a> {
    pub fn new(sink: &'a dyn RecordSink) -> Self {
        Self { sink }
    }

    /// Drains `source` and feeds its candidates into the sink.
    pub async fn run_source(&self, source: &mut dyn RecordSource) -> Result<RunReport> {
        let batch = source.produce().await?;
        let mut report = RunReport {
            source_issues: batch.issues.len(),
            ..RunReport::default()
        };
        for issue in &batch.issues {
            tracing::warn!(source = source.name(), error = %issue.error, "skipping input");
        }
        self.feed(batch.candidates, &mut report).await?;
        Ok(report)
    }

    /// Feeds already produced candidates into the sink.
    pub async fn run<I>(&self, candidates: I) -> Result<RunReport>
    where
        I: IntoIterator<Item = Candidate>,
    {
        let mut report = RunReport::default();
        self.feed(candidates, &mut report).await?;
        Ok(report)
    }

    async fn feed<I>(&self, candidates: I, report: &mut RunReport) -> Result<()>
    where
        I: IntoIterator<Item = Candidate>,
    {
        for (idx, candidate) in candidates.into_iter().enumerate() {
            report.candidates += 1;
            let position = idx + 1;
            let described = candidate.describe();

            let record = match validate(candidate) {
                Ok(record) => record,
                Err(rejection) => {
                    report.rejected += 1;
                    tracing::warn!(position, candidate = %described, reason = %rejection, "rejected candidate");
                    continue;
                }
            };

            match self.sink.insert(record).await {
                Ok(accepted) => {
                    report.accepted += 1;
                    tracing::debug!(position, identifier = accepted.identifier, "accepted record");
                }
                Err(PipelineError::DuplicateKey { secondary_text }) => {
                    report.duplicates += 1;
                    tracing::warn!(position, candidate = %described, %secondary_text, "skipping duplicate entry");
                }
                Err(error) => {
                    tracing::error!(position, candidate = %described, %error, partial = %report, "aborting run");
                    return Err(error);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewRecord, Record};
    use crate::source::{ApiSource, SourceBatch};
    use crate::storage::MemorySink;
    use async_trait::async_trait;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Memory sink whose `fail_on`-th insert hits a storage failure.
    struct BrokenSink {
        inner: MemorySink,
        attempts: AtomicUsize,
        fail_on: usize,
    }

    impl BrokenSink {
        fn new(fail_on: usize) -> Self {
            Self {
                inner: MemorySink::new(),
                attempts: AtomicUsize::new(0),
                fail_on,
            }
        }
    }

    #[async_trait]
    impl RecordSink for BrokenSink {
        async fn initialize(&self) -> Result<()> {
            self.inner.initialize().await
        }

        async fn clear(&self) -> Result<()> {
            self.inner.clear().await
        }

        async fn insert(&self, record: NewRecord) -> Result<Record> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt == self.fail_on {
                return Err(PipelineError::Storage(sqlx::Error::PoolClosed));
            }
            self.inner.insert(record).await
        }

        async fn fetch_all(&self, limit: Option<u32>) -> Result<Vec<Record>> {
            self.inner.fetch_all(limit).await
        }

        async fn fetch(&self, identifier: i64) -> Result<Option<Record>> {
            self.inner.fetch(identifier).await
        }

        async fn count(&self) -> Result<u64> {
            self.inner.count().await
        }
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Fixed(Vec<Candidate>, usize);

    #[async_trait]
    impl RecordSource for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn produce(&mut self) -> Result<SourceBatch> {
            let mut batch = SourceBatch::from_candidates(std::mem::take(&mut self.0));
            for line in 0..self.1 {
                batch.issues.push(crate::source::SourceIssue {
                    error: PipelineError::Format {
                        line: line as u64 + 2,
                        reason: "bad".into(),
                    },
                });
            }
            Ok(batch)
        }
    }

    #[tokio::test]
    async fn isolates_rejections_and_duplicates() {
        let sink = MemorySink::new();
        let pipeline = RecordPipeline::new(&sink);
        let report = pipeline
            .run(vec![
                Candidate::new("Ann", "ann@example.com", None),
                Candidate::new("", "nobody@example.com", None),
                Candidate::new("Ann B", "ann@example.com", None),
                Candidate::new("Bob", "bob@example.com", Some(4)),
            ])
            .await
            .unwrap();
        assert_eq!(
            report,
            RunReport {
                candidates: 4,
                accepted: 2,
                rejected: 1,
                duplicates: 1,
                source_issues: 0,
            }
        );
        assert_eq!(sink.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn counts_source_issues() {
        let sink = MemorySink::new();
        let mut source = Fixed(vec![Candidate::new("a", "b", None)], 2);
        let report = RecordPipeline::new(&sink).run_source(&mut source).await.unwrap();
        assert_eq!(report.accepted, 1);
        assert_eq!(report.source_issues, 2);
    }

    #[tokio::test]
    async fn storage_failure_stops_the_run() {
        let sink = BrokenSink::new(3);
        let candidates = (1..=5).map(|i| Candidate::new("t", &format!("s{i}"), Some(i)));
        let err = RecordPipeline::new(&sink).run(candidates).await.unwrap_err();

        assert!(matches!(err, PipelineError::Storage(_)));
        assert!(!err.is_recoverable());
        // Nothing after the failing insert is attempted.
        assert_eq!(sink.attempts.load(Ordering::SeqCst), 3);
        // Records committed before the failure stay.
        assert_eq!(sink.count().await.unwrap(), 2);
        let kept: Vec<String> = sink
            .fetch_all(None)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.secondary_text)
            .collect();
        assert_eq!(kept, vec!["s1", "s2"]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn transport_failure_is_logged_once() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let mut source =
            ApiSource::new(format!("http://127.0.0.1:{port}/records"), Duration::from_secs(2)).unwrap();
        let sink = MemorySink::new();
        let report = RecordPipeline::new(&sink).run_source(&mut source).await.unwrap();
        assert_eq!(report.source_issues, 1);

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let warnings = output.lines().filter(|line| line.contains("WARN")).count();
        assert_eq!(warnings, 1, "log output:\n{output}");
    }

    #[tokio::test]
    async fn empty_source_is_fine() {
        let sink = MemorySink::new();
        let report = RecordPipeline::new(&sink).run(Vec::new()).await.unwrap();
        assert_eq!(report, RunReport::default());
        assert_eq!(report.to_string(), "accepted 0 of 0 candidates (0 rejected, 0 duplicates, 0 source issues)");
    }
}
