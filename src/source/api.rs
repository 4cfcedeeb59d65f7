//! Client for the record-serving endpoint.

use crate::domain::{Candidate, ServedRecord};
use crate::error::Result;
use crate::source::{RecordSource, SourceBatch, SourceIssue};
use async_trait::async_trait;
use std::time::Duration;

/// Fetches the full candidate list with one bounded GET.
pub struct ApiSource {
    client: reqwest::Client,
    url: String,
}

impl ApiSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issues the GET. Any transport failure, bad status or bad body is an error here;
    /// [`RecordSource::produce`] turns it into an empty batch.
    pub async fn fetch(&self) -> Result<Vec<Candidate>> {
        let served: Vec<ServedRecord> = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(served.into_iter().map(Candidate::from).collect())
    }
}

#[async_trait]
impl RecordSource for ApiSource {
    fn name(&self) -> &str {
        "api"
    }

    async fn produce(&mut self) -> Result<SourceBatch> {
        match self.fetch().await {
            Ok(candidates) => {
                tracing::info!(url = %self.url, fetched = candidates.len(), "fetched records from API");
                Ok(SourceBatch::from_candidates(candidates))
            }
            // Logged by the pipeline when it drains the batch issues.
            Err(error) => Ok(SourceBatch {
                candidates: Vec::new(),
                issues: vec![SourceIssue { error }],
            }),
        }
    }
}
