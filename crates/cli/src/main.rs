mod metrics;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seeker_core::{
    build_pipeline, load_config, validate_config, OutputFormat, SearchContext, Sorter,
};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Logs go to stderr so stdout carries only results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = std::env::var("SEEKER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("seeker.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;

    let ctx = SearchContext::from_config(&config);
    info!(
        site = %ctx.site_url,
        uploaders = ?ctx.uploaders,
        terms = ?ctx.terms,
        sort = %config.search.sort,
        "Configuration loaded"
    );

    let pipeline = build_pipeline(&config).context("Failed to create index clients")?;

    let mut sorter = match config.search.seed {
        Some(seed) => Sorter::seeded(seed),
        None => Sorter::from_entropy(),
    };

    let report = pipeline
        .run(&ctx, config.search.sort, &mut sorter)
        .await
        .context("Search could not start")?;

    for term_error in &report.term_errors {
        warn!(term = %term_error.term, error = %term_error.error, "Term skipped");
    }
    if let Some(notice) = report.results.verification().notice() {
        warn!("{}", notice);
    }

    let enrichments = pipeline.enricher().enrich(report.results.records()).await;

    let output = match config.output.format {
        OutputFormat::Text => render::render_text(&report, &ctx.site_url, &enrichments),
        OutputFormat::Json => render::render_json(&report, &ctx.site_url, &enrichments)
            .context("Failed to serialize results")?,
    };
    println!("{}", output);

    metrics::RESULTS_SHOWN.set(report.results.len() as i64);
    if let Some(path) = &config.output.metrics_path {
        metrics::write_metrics(path)?;
        info!("Metrics written to {:?}", path);
    }

    info!(results = report.results.len(), "Done");
    Ok(())
}
