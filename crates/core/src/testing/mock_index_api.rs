//! Mock search index for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::searcher::{ApiListing, IndexApi, RecordId, TransportError};

/// Mock implementation of the `IndexApi` trait.
///
/// Provides controllable behavior for testing:
/// - Per-term listings and per-term failures
/// - Per-listing descriptions and description failures
/// - Recorded terms and description lookups for assertions
///
/// Clones share state, so a test can keep a handle after handing one to the
/// pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use seeker_core::testing::{MockIndexApi, fixtures};
///
/// let api = MockIndexApi::new();
/// api.set_listings("linux", vec![fixtures::listing("1", "Debian", "Alice")]).await;
///
/// let listings = api.search("linux").await?;
/// assert_eq!(listings.len(), 1);
/// assert_eq!(api.recorded_terms().await, vec!["linux"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockIndexApi {
    /// Listings returned per search term.
    listings: Arc<RwLock<HashMap<String, Vec<ApiListing>>>>,
    /// Terms whose search fails.
    term_errors: Arc<RwLock<HashMap<String, TransportError>>>,
    /// Description text per listing id.
    descriptions: Arc<RwLock<HashMap<String, String>>>,
    /// Listing ids whose description fetch fails.
    description_errors: Arc<RwLock<HashMap<String, TransportError>>>,
    /// Terms searched, in call order.
    terms: Arc<RwLock<Vec<String>>>,
    /// Description ids requested, in call order.
    description_requests: Arc<RwLock<Vec<String>>>,
}

impl MockIndexApi {
    /// Create a new mock with no listings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the listings returned for a term.
    pub async fn set_listings(&self, term: &str, listings: Vec<ApiListing>) {
        self.listings.write().await.insert(term.to_string(), listings);
    }

    /// Make searches for `term` fail.
    pub async fn fail_term(&self, term: &str, error: TransportError) {
        self.term_errors.write().await.insert(term.to_string(), error);
    }

    /// Set the description text for a listing id.
    pub async fn set_description(&self, id: &str, descr: &str) {
        self.descriptions
            .write()
            .await
            .insert(id.to_string(), descr.to_string());
    }

    /// Make description fetches for `id` fail.
    pub async fn fail_description(&self, id: &str, error: TransportError) {
        self.description_errors
            .write()
            .await
            .insert(id.to_string(), error);
    }

    /// Terms searched so far.
    pub async fn recorded_terms(&self) -> Vec<String> {
        self.terms.read().await.clone()
    }

    /// Listing ids whose description was requested so far.
    pub async fn recorded_descriptions(&self) -> Vec<String> {
        self.description_requests.read().await.clone()
    }
}

#[async_trait]
impl IndexApi for MockIndexApi {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, term: &str) -> Result<Vec<ApiListing>, TransportError> {
        self.terms.write().await.push(term.to_string());

        if let Some(err) = self.term_errors.read().await.get(term) {
            return Err(err.clone());
        }

        Ok(self
            .listings
            .read()
            .await
            .get(term)
            .cloned()
            .unwrap_or_default())
    }

    async fn description(&self, id: &RecordId) -> Result<String, TransportError> {
        let id = id.to_string();
        self.description_requests.write().await.push(id.clone());

        if let Some(err) = self.description_errors.read().await.get(&id) {
            return Err(err.clone());
        }

        Ok(self
            .descriptions
            .read()
            .await
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }
}
