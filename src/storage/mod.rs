//! Record sinks: the exclusive owners of the accepted record set.

use crate::domain::{NewRecord, Record};
use crate::error::Result;
use async_trait::async_trait;

pub mod memory;
pub mod sqlite;

pub use memory::MemorySink;
pub use sqlite::SqliteSink;

/// Storage contract for accepted records.
///
/// A sink is the only component that assigns identifiers. Implementations must be
/// `Send + Sync` so they can be shared behind `Arc<dyn RecordSink>`.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Creates the backing schema if absent. Safe to call repeatedly.
    async fn initialize(&self) -> Result<()>;

    /// Removes every accepted record. The identifier sequence is not reset.
    async fn clear(&self) -> Result<()>;

    /// Assigns the next identifier and commits the record before returning.
    ///
    /// # Errors
    ///
    /// `DuplicateKey` when `secondary_text` is already taken (recoverable),
    /// `Storage` on any lower-level failure (fatal).
    async fn insert(&self, record: NewRecord) -> Result<Record>;

    /// Accepted records in ascending identifier order, at most `limit` of them.
    async fn fetch_all(&self, limit: Option<u32>) -> Result<Vec<Record>>;

    /// One accepted record by identifier.
    async fn fetch(&self, identifier: i64) -> Result<Option<Record>>;

    /// Total number of accepted records.
    async fn count(&self) -> Result<u64>;

    /// Releases the storage resource. The default does nothing.
    async fn close(&self) {}
}

/// Returns true if `ident` can be spliced into SQL as a table name.
pub fn validate_ident(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
