//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Search queries against the index (per-term outcome, records kept)
//! - Liveness probing (batch outcomes, durations, fallbacks)
//! - Description enrichment

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Search
// =============================================================================

/// Search queries by result.
pub static SEARCH_QUERIES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("seeker_search_queries_total", "Total search index queries"),
        &["result"], // "ok", "error"
    )
    .unwrap()
});

/// Records kept after uploader filtering.
pub static RECORDS_COLLECTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "seeker_records_collected_total",
        "Records kept after uploader filtering",
    )
    .unwrap()
});

/// Listings dropped because their numeric fields did not parse.
pub static LISTINGS_REJECTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "seeker_listings_rejected_total",
        "Listings dropped during normalization",
    )
    .unwrap()
});

// =============================================================================
// Liveness
// =============================================================================

/// Probe batches by outcome.
pub static PROBE_BATCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("seeker_probe_batches_total", "Liveness probe batches"),
        &["outcome"], // "success", "failure"
    )
    .unwrap()
});

/// Probe batch duration in seconds.
pub static PROBE_BATCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "seeker_probe_batch_duration_seconds",
            "Duration of one liveness probe batch",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["outcome"],
    )
    .unwrap()
});

/// Records dropped because their detail page returned 404.
pub static DEAD_RECORDS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("seeker_dead_records_total", "Records with a 404 detail page").unwrap()
});

/// Runs that gave up on verification and returned unfiltered results.
pub static VERIFICATION_FALLBACKS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "seeker_verification_fallbacks_total",
        "Liveness checks abandoned after exhausting retries",
    )
    .unwrap()
});

// =============================================================================
// Enrichment
// =============================================================================

/// Description fetches by result.
pub static ENRICHMENT_FETCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "seeker_enrichment_fetches_total",
            "Description fetches for link enrichment",
        ),
        &["result"], // "ok", "error"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Search
        Box::new(SEARCH_QUERIES.clone()),
        Box::new(RECORDS_COLLECTED.clone()),
        Box::new(LISTINGS_REJECTED.clone()),
        // Liveness
        Box::new(PROBE_BATCHES.clone()),
        Box::new(PROBE_BATCH_DURATION.clone()),
        Box::new(DEAD_RECORDS.clone()),
        Box::new(VERIFICATION_FALLBACKS.clone()),
        // Enrichment
        Box::new(ENRICHMENT_FETCHES.clone()),
    ]
}
