//! Torrent index search.
//!
//! This module provides the `IndexApi` and `DetailProbe` traits for talking
//! to the remote index, the reqwest-backed `ApibayClient`, per-term
//! aggregation with uploader filtering, and structural deduplication.

mod aggregate;
mod apibay;
mod dedup;
mod types;

pub use aggregate::{Aggregated, QueryAggregator, TermError};
pub use apibay::ApibayClient;
pub use dedup::deduplicate_records;
pub use types::*;
