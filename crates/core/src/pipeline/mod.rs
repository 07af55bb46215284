//! The search pipeline.
//!
//! A run queries the index once per term, keeps listings by the requested
//! uploaders, removes exact duplicates, drops listings whose detail page is
//! gone, and orders what remains. Enrichment is applied separately at
//! presentation time.

mod context;
mod runner;
mod types;

pub use context::{normalize_site_url, normalize_term, normalize_uploader, SearchContext};
pub use runner::{build_pipeline, Pipeline};
pub use types::{PipelineError, PipelineReport, ResultSet};
