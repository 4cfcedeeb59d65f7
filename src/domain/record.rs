//! Record shapes as they move through the pipeline.
//!
//! `Candidate` (unvalidated) -> `NewRecord` (validated, no identifier yet) -> `Record`
//! (accepted, identifier assigned by the sink).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A record produced by a source, not yet validated.
///
/// Text fields are optional so that a missing value reaches the validator as a
/// rejection instead of failing the decode of the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub primary_text: Option<String>,
    #[serde(default)]
    pub secondary_text: Option<String>,
    #[serde(default)]
    pub numeric_attribute: Option<i64>,
}

impl Candidate {
    pub fn new(
        primary_text: impl Into<String>,
        secondary_text: impl Into<String>,
        numeric_attribute: Option<i64>,
    ) -> Self {
        Self {
            primary_text: Some(primary_text.into()),
            secondary_text: Some(secondary_text.into()),
            numeric_attribute,
        }
    }

    /// Short human-readable form used in diagnostics.
    pub fn describe(&self) -> String {
        format!(
            "({}, {}, {})",
            self.primary_text.as_deref().unwrap_or("<missing>"),
            self.secondary_text.as_deref().unwrap_or("<missing>"),
            self.numeric_attribute
                .map(|n| n.to_string())
                .unwrap_or_else(|| "null".to_string())
        )
    }
}

/// A validated record ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub primary_text: String,
    pub secondary_text: String,
    pub numeric_attribute: Option<i64>,
}

impl NewRecord {
    pub fn into_record(self, identifier: i64) -> Record {
        Record {
            identifier,
            primary_text: self.primary_text,
            secondary_text: self.secondary_text,
            numeric_attribute: self.numeric_attribute,
        }
    }
}

/// An accepted, persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    pub identifier: i64,
    pub primary_text: String,
    pub secondary_text: String,
    pub numeric_attribute: Option<i64>,
}

/// A generated record as served by the record server.
///
/// `id` is the catalog position on the server side; clients never use it as an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ServedRecord {
    pub id: i64,
    #[serde(default)]
    pub primary_text: Option<String>,
    #[serde(default)]
    pub secondary_text: Option<String>,
    #[serde(default)]
    pub numeric_attribute: Option<i64>,
}

impl From<ServedRecord> for Candidate {
    fn from(served: ServedRecord) -> Self {
        Candidate {
            primary_text: served.primary_text,
            secondary_text: served.secondary_text,
            numeric_attribute: served.numeric_attribute,
        }
    }
}
