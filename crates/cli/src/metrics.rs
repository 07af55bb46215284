//! Prometheus exposition for a finished run.
//!
//! The core records search, liveness and enrichment metrics as it works; this
//! module owns the registry they are gathered from and writes the text format
//! to a file when one is configured.

use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntGauge, Registry, TextEncoder};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Records in the final result set of the last run.
pub static RESULTS_SHOWN: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("seeker_results_shown", "Records in the final result set").unwrap()
});

fn register_metrics(registry: &Registry) {
    registry.register(Box::new(RESULTS_SHOWN.clone())).unwrap();

    for metric in seeker_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics in Prometheus text format.
pub fn encode_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .context("Failed to encode metrics")?;
    String::from_utf8(buffer).context("Metrics output is not UTF-8")
}

/// Write the text exposition to `path`, replacing any previous file.
pub fn write_metrics(path: &Path) -> Result<()> {
    let text = encode_metrics()?;
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write metrics to {:?}", path))
}
