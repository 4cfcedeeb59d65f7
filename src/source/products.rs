//! Product price feed used by the price report.

use crate::error::Result;
use serde::Deserialize;
use std::time::Duration;

/// One product; fields other than title and price are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub title: String,
    pub price: f64,
}

pub struct ProductSource {
    client: reqwest::Client,
    url: String,
}

impl ProductSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub async fn fetch(&self) -> Result<Vec<Product>> {
        let products = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(products)
    }
}
