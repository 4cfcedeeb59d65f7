//! Error taxonomy for the record pipeline.
//!
//! Recoverable errors (`Transport`, `Format`, `DuplicateKey`) are handled where they
//! occur and the run continues. `Storage` and `SourceIo` abort the run.

/// Errors produced by sources, sinks and the pipeline driver.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The record endpoint was unreachable, timed out, or answered with a bad status/body.
    #[error("transport error: {0}")]
    Transport(String),

    /// Malformed header or row in a delimited input.
    #[error("format error at line {line}: {reason}")]
    Format { line: u64, reason: String },

    /// `secondary_text` collides with an already accepted record.
    #[error("duplicate secondary_text '{secondary_text}'")]
    DuplicateKey { secondary_text: String },

    /// Lower-level failure of the durable store.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// The input file could not be opened or read.
    #[error("source i/o error: {0}")]
    SourceIo(#[from] std::io::Error),

    /// A table name that is not a plain SQL identifier.
    #[error("invalid table name '{0}'")]
    InvalidIdentifier(String),
}

impl PipelineError {
    /// Whether the run may continue with the next candidate after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Format { .. } | Self::DuplicateKey { .. }
        )
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, PipelineError>;
