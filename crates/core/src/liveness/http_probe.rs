//! reqwest-backed detail page probe.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::searcher::{ApiError, DetailProbe, TransportError};

use super::LivenessConfig;

/// Issues a GET against a detail page and reports the status code.
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(config: &LivenessConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.probe_timeout_ms))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl DetailProbe for HttpProbe {
    async fn probe(&self, url: &str) -> Result<u16, TransportError> {
        let response = self.client.get(url).send().await?;
        let code = response.status().as_u16();
        debug!(url = %url, code = code, "Probed detail page");
        Ok(code)
    }
}
