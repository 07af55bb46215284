//! Per-term querying with uploader filtering.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::metrics;

use super::{IndexApi, Record, TransportError};

/// A search term whose query failed. Its contribution is treated as empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermError {
    pub term: String,
    pub error: TransportError,
}

/// Records gathered across all terms, before deduplication.
#[derive(Debug, Clone, Default)]
pub struct Aggregated {
    /// Kept records in term order, then response order within a term.
    pub records: Vec<Record>,
    /// Terms whose query failed.
    pub term_errors: Vec<TermError>,
    /// Listings dropped because they could not be normalized.
    pub rejected: usize,
}

/// Issues one query per term and keeps listings by the given uploaders.
pub struct QueryAggregator<'a> {
    api: &'a dyn IndexApi,
}

impl<'a> QueryAggregator<'a> {
    pub fn new(api: &'a dyn IndexApi) -> Self {
        Self { api }
    }

    /// Query every term sequentially. A failed term is logged, recorded in
    /// `term_errors`, and does not stop the remaining terms.
    pub async fn collect(&self, terms: &[String], uploaders: &[String]) -> Aggregated {
        let wanted: HashSet<&str> = uploaders.iter().map(String::as_str).collect();
        let mut out = Aggregated::default();

        for term in terms {
            let listings = match self.api.search(term).await {
                Ok(listings) => {
                    metrics::SEARCH_QUERIES.with_label_values(&["ok"]).inc();
                    listings
                }
                Err(e) => {
                    metrics::SEARCH_QUERIES.with_label_values(&["error"]).inc();
                    warn!(backend = self.api.name(), term = %term, error = %e, "Search query failed");
                    out.term_errors.push(TermError {
                        term: term.clone(),
                        error: e,
                    });
                    continue;
                }
            };

            let before = out.records.len();
            for listing in listings {
                if listing.is_placeholder() || !wanted.contains(listing.username.as_str()) {
                    continue;
                }
                let id = listing.id.clone();
                match Record::try_from(listing) {
                    Ok(record) => out.records.push(record),
                    Err(e) => {
                        metrics::LISTINGS_REJECTED.inc();
                        warn!(term = %term, id = %id, error = %e, "Dropping malformed listing");
                        out.rejected += 1;
                    }
                }
            }

            let kept = out.records.len() - before;
            metrics::RECORDS_COLLECTED.inc_by(kept as u64);
            debug!(term = %term, kept = kept, "Term collected");
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockIndexApi};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_keeps_only_wanted_uploaders() {
        let api = MockIndexApi::new();
        api.set_listings(
            "linux",
            vec![
                fixtures::listing("1", "Debian", "Alice"),
                fixtures::listing("2", "Arch", "Bob"),
                fixtures::listing("3", "Fedora", "Carol"),
            ],
        )
        .await;

        let result = QueryAggregator::new(&api)
            .collect(&strings(&["linux"]), &strings(&["Alice", "Carol"]))
            .await;

        let names: Vec<_> = result.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Debian", "Fedora"]);
        assert!(result.records.iter().all(|r| r.username != "Bob"));
        assert!(result.term_errors.is_empty());
    }

    #[tokio::test]
    async fn test_username_match_is_exact() {
        let api = MockIndexApi::new();
        api.set_listings(
            "linux",
            vec![
                fixtures::listing("1", "Debian", "alice"),
                fixtures::listing("2", "Arch", "Alice "),
            ],
        )
        .await;

        let result = QueryAggregator::new(&api)
            .collect(&strings(&["linux"]), &strings(&["Alice"]))
            .await;

        assert!(result.records.is_empty());
    }

    #[tokio::test]
    async fn test_preserves_term_then_response_order() {
        let api = MockIndexApi::new();
        api.set_listings(
            "b",
            vec![
                fixtures::listing("20", "B1", "Alice"),
                fixtures::listing("21", "B2", "Alice"),
            ],
        )
        .await;
        api.set_listings("a", vec![fixtures::listing("10", "A1", "Alice")])
            .await;

        let result = QueryAggregator::new(&api)
            .collect(&strings(&["b", "a"]), &strings(&["Alice"]))
            .await;

        let names: Vec<_> = result.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B1", "B2", "A1"]);
        assert_eq!(api.recorded_terms().await, strings(&["b", "a"]));
    }

    #[tokio::test]
    async fn test_failed_term_does_not_abort_others() {
        let api = MockIndexApi::new();
        api.fail_term("broken", TransportError::Timeout).await;
        api.set_listings("ok", vec![fixtures::listing("1", "Fine", "Alice")])
            .await;

        let result = QueryAggregator::new(&api)
            .collect(&strings(&["broken", "ok"]), &strings(&["Alice"]))
            .await;

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.term_errors.len(), 1);
        assert_eq!(result.term_errors[0].term, "broken");
        assert_eq!(result.term_errors[0].error, TransportError::Timeout);
    }

    #[tokio::test]
    async fn test_skips_placeholder_and_malformed() {
        let api = MockIndexApi::new();
        let mut bad = fixtures::listing("5", "Bad", "Alice");
        bad.size = crate::searcher::WireNumber::Text("n/a".to_string());
        api.set_listings(
            "x",
            vec![fixtures::placeholder_listing(), bad, fixtures::listing("6", "Good", "Alice")],
        )
        .await;

        let result = QueryAggregator::new(&api)
            .collect(&strings(&["x"]), &strings(&["Alice", ""]))
            .await;

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].name, "Good");
        assert_eq!(result.rejected, 1);
    }
}
