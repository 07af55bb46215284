//! Types for the search pipeline.

use serde::Serialize;
use thiserror::Error;

use crate::liveness::Verification;
use crate::searcher::{Record, TermError};
use crate::sorter::{SortKey, Sorter};

/// Errors that stop a pipeline run before any query is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("No site URL given")]
    NoSite,

    #[error("No uploader identities given")]
    NoUploaders,

    #[error("No search terms given")]
    NoTerms,
}

/// Ordered, verification-annotated records.
///
/// Can be re-sorted any number of times without repeating the network work
/// that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct ResultSet {
    records: Vec<Record>,
    verification: Verification,
    order: Option<SortKey>,
}

impl ResultSet {
    pub fn new(records: Vec<Record>, verification: Verification) -> Self {
        Self {
            records,
            verification,
            order: None,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn verification(&self) -> &Verification {
        &self.verification
    }

    /// The last ordering applied, if any.
    pub fn order(&self) -> Option<SortKey> {
        self.order
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Reorder the records in place.
    pub fn sort_by(&mut self, key: SortKey, sorter: &mut Sorter) {
        sorter.sort(&mut self.records, key);
        self.order = Some(key);
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub results: ResultSet,
    /// Records kept after uploader filtering, before deduplication.
    pub collected: usize,
    /// Records left after deduplication.
    pub unique: usize,
    /// Listings dropped because they could not be normalized.
    pub rejected: usize,
    /// Terms whose query failed.
    pub term_errors: Vec<TermError>,
}

impl PipelineReport {
    /// Records removed for having a dead detail page.
    pub fn dead_dropped(&self) -> usize {
        match self.results.verification() {
            Verification::Filtered { dropped, .. } => *dropped,
            Verification::Unverified { .. } => 0,
        }
    }
}
