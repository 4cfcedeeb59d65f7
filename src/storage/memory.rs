//! In-memory record sink with the same contract as the SQLite one.

use crate::domain::{NewRecord, Record};
use crate::error::{PipelineError, Result};
use crate::storage::RecordSink;
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::Mutex;

#[derive(Default)]
struct Inner {
    records: Vec<Record>,
    secondary_index: HashSet<String>,
    last_identifier: i64,
}

/// Keeps accepted records in a `Vec` ordered by identifier.
///
/// Identifiers are never reused, even across `clear()`.
#[derive(Default)]
pub struct MemorySink {
    inner: Mutex<Inner>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.records.clear();
        inner.secondary_index.clear();
        Ok(())
    }

    async fn insert(&self, record: NewRecord) -> Result<Record> {
        let mut inner = self.inner.lock().await;
        if inner.secondary_index.contains(&record.secondary_text) {
            return Err(PipelineError::DuplicateKey {
                secondary_text: record.secondary_text,
            });
        }
        inner.last_identifier += 1;
        let accepted = record.into_record(inner.last_identifier);
        inner.secondary_index.insert(accepted.secondary_text.clone());
        inner.records.push(accepted.clone());
        Ok(accepted)
    }

    async fn fetch_all(&self, limit: Option<u32>) -> Result<Vec<Record>> {
        let inner = self.inner.lock().await;
        let take = limit.map_or(inner.records.len(), |l| l as usize);
        Ok(inner.records.iter().take(take).cloned().collect())
    }

    async fn fetch(&self, identifier: i64) -> Result<Option<Record>> {
        let inner = self.inner.lock().await;
        // Records are pushed in identifier order.
        Ok(inner
            .records
            .binary_search_by_key(&identifier, |r| r.identifier)
            .ok()
            .map(|idx| inner.records[idx].clone()))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.inner.lock().await.records.len() as u64)
    }
}
