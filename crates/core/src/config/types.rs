use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::enricher::EnrichmentConfig;
use crate::liveness::LivenessConfig;
use crate::sorter::SortKey;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub liveness: LivenessConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Site whose detail pages are probed and linked
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Base URL of the site or one of its mirrors (e.g. "thepiratebay.org")
    pub url: String,
}

/// Search index API configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Index API base URL (default: "https://apibay.org")
    #[serde(default = "default_api_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_api_url() -> String {
    "https://apibay.org".to_string()
}

fn default_timeout() -> u64 {
    10
}

/// Search parameters
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Uploader identities to keep
    #[serde(default)]
    pub usernames: Vec<String>,
    /// Terms to query, one request each
    #[serde(default)]
    pub terms: Vec<String>,
    /// Result ordering
    #[serde(default)]
    pub sort: SortKey,
    /// Seed for `random` ordering; unseeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// How results are written
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Write Prometheus text metrics here after the run
    #[serde(default)]
    pub metrics_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
