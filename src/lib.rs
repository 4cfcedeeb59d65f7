pub mod app;
pub mod domain;
pub mod error;
pub mod infra;
pub mod source;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{RecordPipeline, RunReport};
pub use domain::{Candidate, NewRecord, Record, Vocabulary};
pub use error::PipelineError;
pub use source::{ApiSource, CsvSource, RecordGenerator, RecordSource};
pub use storage::{MemorySink, RecordSink, SqliteSink};
