//! Aggregate → deduplicate → verify → sort.

use tracing::info;

use crate::config::Config;
use crate::enricher::{Enricher, EnrichmentConfig};
use crate::liveness::{HttpProbe, LivenessChecker, LivenessConfig};
use crate::searcher::{
    deduplicate_records, ApiError, ApibayClient, DetailProbe, IndexApi, QueryAggregator,
};
use crate::sorter::{SortKey, Sorter};

use super::{PipelineError, PipelineReport, ResultSet, SearchContext};

/// The search pipeline, generic over its remote services.
pub struct Pipeline<A: IndexApi, P: DetailProbe> {
    api: A,
    checker: LivenessChecker<P>,
    enrichment: EnrichmentConfig,
}

impl<A: IndexApi, P: DetailProbe> Pipeline<A, P> {
    pub fn new(api: A, probe: P, liveness: LivenessConfig, enrichment: EnrichmentConfig) -> Self {
        Self {
            api,
            checker: LivenessChecker::new(probe, liveness),
            enrichment,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run the search for `ctx` and order the survivors by `sort`.
    ///
    /// Never fails once the context is valid: query failures shrink the
    /// result, and a liveness check that keeps failing yields unverified
    /// results instead of an error.
    pub async fn run(
        &self,
        ctx: &SearchContext,
        sort: SortKey,
        sorter: &mut Sorter,
    ) -> Result<PipelineReport, PipelineError> {
        ctx.validate()?;

        info!(
            terms = ctx.terms.len(),
            uploaders = ctx.uploaders.len(),
            "Searching"
        );

        let aggregated = QueryAggregator::new(&self.api)
            .collect(&ctx.terms, &ctx.uploaders)
            .await;
        let collected = aggregated.records.len();

        let unique = deduplicate_records(aggregated.records);
        let unique_count = unique.len();
        info!(
            collected = collected,
            unique = unique_count,
            "Found potential results, checking for dead listings"
        );

        let outcome = self.checker.check(&ctx.site_url, unique).await;

        let mut results = ResultSet::new(outcome.records, outcome.verification);
        results.sort_by(sort, sorter);

        Ok(PipelineReport {
            results,
            collected,
            unique: unique_count,
            rejected: aggregated.rejected,
            term_errors: aggregated.term_errors,
        })
    }

    /// Link enricher sharing this pipeline's index client.
    pub fn enricher(&self) -> Enricher<'_> {
        Enricher::new(&self.api, self.enrichment.clone())
    }
}

/// Build a pipeline talking to the real index and site.
pub fn build_pipeline(config: &Config) -> Result<Pipeline<ApibayClient, HttpProbe>, ApiError> {
    let api = ApibayClient::new(&config.api)?;
    let probe = HttpProbe::new(&config.liveness)?;
    Ok(Pipeline::new(
        api,
        probe,
        config.liveness.clone(),
        config.enrichment.clone(),
    ))
}
