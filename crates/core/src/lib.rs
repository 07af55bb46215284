pub mod config;
pub mod enricher;
pub mod liveness;
pub mod metrics;
pub mod pipeline;
pub mod searcher;
pub mod sorter;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, ApiConfig, Config, ConfigError,
    OutputConfig, OutputFormat, SearchConfig, SiteConfig,
};
pub use enricher::{extract_links, Enricher, Enrichment, EnrichmentConfig};
pub use liveness::{
    HttpProbe, LivenessChecker, LivenessConfig, LivenessOutcome, Verification, UNVERIFIED_NOTICE,
};
pub use pipeline::{
    build_pipeline, normalize_site_url, normalize_term, normalize_uploader, Pipeline,
    PipelineError, PipelineReport, ResultSet, SearchContext,
};
pub use searcher::{
    deduplicate_records, detail_url, ApiError, ApiListing, ApibayClient, DetailProbe, IndexApi,
    QueryAggregator, Record, RecordId, TermError, TransportError,
};
pub use sorter::{SortKey, Sorter, UnknownSortKey};
