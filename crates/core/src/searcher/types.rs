//! Types for the uploader search system.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Listing identifier. The search API returns it either as a numeric string
/// or as a bare integer, so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        RecordId::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

/// One torrent listing flowing through the pipeline.
///
/// Equality and hashing cover every field, so two records compare equal only
/// when they are structurally identical. `code` is `None` until the liveness
/// check has run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    /// Uploader identity.
    pub username: String,
    /// Uploader trust tier (e.g. "vip", "trusted", "member").
    pub status: String,
    /// Size in bytes.
    pub size: u64,
    /// Upload time as a Unix timestamp.
    pub added: i64,
    pub seeders: u64,
    pub info_hash: String,
    /// HTTP status of the detail page, set by the liveness check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl Record {
    /// Whether the liveness check has annotated this record.
    pub fn is_verified(&self) -> bool {
        self.code.is_some()
    }
}

/// Numeric field as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireNumber {
    Int(i64),
    Text(String),
}

impl WireNumber {
    fn as_i64(&self) -> Option<i64> {
        match self {
            WireNumber::Int(n) => Some(*n),
            WireNumber::Text(s) => s.trim().parse().ok(),
        }
    }

    fn describe(&self) -> String {
        match self {
            WireNumber::Int(n) => n.to_string(),
            WireNumber::Text(s) => s.clone(),
        }
    }
}

/// Raw listing object from `q.php`, before numeric normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiListing {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub status: String,
    pub size: WireNumber,
    pub added: WireNumber,
    pub seeders: WireNumber,
    #[serde(default)]
    pub info_hash: String,
}

/// Name the search API gives its "nothing found" placeholder listing.
const PLACEHOLDER_NAME: &str = "No results returned";

impl ApiListing {
    /// The API answers an empty search with a single placeholder listing
    /// whose id is zero.
    pub fn is_placeholder(&self) -> bool {
        let zero_id = match &self.id {
            RecordId::Number(n) => *n == 0,
            RecordId::Text(s) => s == "0",
        };
        zero_id && self.name == PLACEHOLDER_NAME
    }
}

/// Why a wire listing could not become a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("Field `{field}` is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Field `{field}` is negative: {value}")]
    Negative { field: &'static str, value: i64 },
}

fn non_negative(field: &'static str, raw: &WireNumber) -> Result<u64, ListingError> {
    let value = raw.as_i64().ok_or_else(|| ListingError::InvalidNumber {
        field,
        value: raw.describe(),
    })?;
    u64::try_from(value).map_err(|_| ListingError::Negative { field, value })
}

impl TryFrom<ApiListing> for Record {
    type Error = ListingError;

    fn try_from(listing: ApiListing) -> Result<Self, Self::Error> {
        let size = non_negative("size", &listing.size)?;
        let seeders = non_negative("seeders", &listing.seeders)?;
        let added = listing
            .added
            .as_i64()
            .ok_or_else(|| ListingError::InvalidNumber {
                field: "added",
                value: listing.added.describe(),
            })?;

        Ok(Record {
            id: listing.id,
            name: listing.name,
            username: listing.username,
            status: listing.status,
            size,
            added,
            seeders,
            info_hash: listing.info_hash,
            code: None,
        })
    }
}

/// Transport-level failure talking to a remote endpoint.
///
/// Variants are kept apart for logging, but every variant feeds the same
/// retry policy in the liveness check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Transport error: {0}")]
    Other(String),
}

/// Errors building an API client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Remote search index (`q.php` and `t.php`).
#[async_trait]
pub trait IndexApi: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Run one search for a single term.
    async fn search(&self, term: &str) -> Result<Vec<ApiListing>, TransportError>;

    /// Fetch the free-text description of a listing.
    async fn description(&self, id: &RecordId) -> Result<String, TransportError>;
}

/// Probe for a listing's detail page. Only the status code matters.
#[async_trait]
pub trait DetailProbe: Send + Sync {
    async fn probe(&self, url: &str) -> Result<u16, TransportError>;
}

/// Build the detail page URL for a listing on the given site.
pub fn detail_url(site_url: &str, id: &RecordId) -> String {
    format!("{}/torrent/{}", site_url.trim_end_matches('/'), id)
}
