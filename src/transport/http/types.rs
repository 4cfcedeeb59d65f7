use crate::domain::{Candidate, ServedRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

/// Read-only list of generated records served by the record server.
///
/// Ids are catalog positions starting at 1.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ServedRecord>,
}

impl Catalog {
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        let records = candidates
            .into_iter()
            .zip(1i64..)
            .map(|(c, id)| ServedRecord {
                id,
                primary_text: c.primary_text,
                secondary_text: c.secondary_text,
                numeric_attribute: c.numeric_attribute,
            })
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[ServedRecord] {
        &self.records
    }

    pub fn get(&self, id: i64) -> Option<&ServedRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HomeResponse {
    pub message: String,
    /// Path -> description.
    pub endpoints: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub records: usize,
}
