//! HTTP backend for the public search index API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::ApiConfig;

use super::{ApiError, ApiListing, IndexApi, RecordId, TransportError};

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connection(e.to_string())
        } else if e.is_decode() {
            TransportError::Parse(e.to_string())
        } else {
            TransportError::Other(e.to_string())
        }
    }
}

/// Search index client speaking the `q.php` / `t.php` protocol.
pub struct ApibayClient {
    client: Client,
    base_url: String,
}

impl ApibayClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, term: &str) -> String {
        format!("{}/q.php?q={}", self.base_url, urlencoding::encode(term))
    }

    fn description_url(&self, id: &RecordId) -> String {
        let id = id.to_string();
        format!("{}/t.php?id={}", self.base_url, urlencoding::encode(&id))
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, TransportError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| TransportError::Parse(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct DescriptionResponse {
    #[serde(default)]
    descr: String,
}

#[async_trait]
impl IndexApi for ApibayClient {
    fn name(&self) -> &str {
        "apibay"
    }

    async fn search(&self, term: &str) -> Result<Vec<ApiListing>, TransportError> {
        let url = self.search_url(term);
        debug!(term = term, "Querying search index");

        let listings: Vec<ApiListing> = self.get_json(&url).await?;

        debug!(term = term, listings = listings.len(), "Search index responded");
        Ok(listings)
    }

    async fn description(&self, id: &RecordId) -> Result<String, TransportError> {
        let url = self.description_url(id);
        let response: DescriptionResponse = self.get_json(&url).await?;
        Ok(response.descr)
    }
}
