//! Description link enrichment for displayed records.
//!
//! For the first records in display order, fetches the listing description
//! and pulls out lines that carry links (screenshots, sample clips, ...).
//! Failures only degrade the affected record.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::metrics;
use crate::searcher::{IndexApi, Record};

/// Configuration for link enrichment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrichmentConfig {
    /// Whether enrichment is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Only the first `max_records` displayed records are enriched.
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_max_records() -> usize {
    100
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_records: default_max_records(),
        }
    }
}

/// Enrichment result for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Enrichment {
    /// Link-bearing description lines, possibly empty.
    Links(Vec<String>),
    /// The description fetch failed.
    Failed(String),
    /// Beyond the cap, or enrichment disabled.
    Skipped,
}

impl Enrichment {
    pub fn links(&self) -> &[String] {
        match self {
            Enrichment::Links(links) => links,
            _ => &[],
        }
    }
}

/// Lines of `description` that contain `http`, trimmed, in order.
pub fn extract_links(description: &str) -> Vec<String> {
    description
        .lines()
        .filter(|line| line.contains("http"))
        .map(|line| line.trim().to_string())
        .collect()
}

/// Fetches descriptions one at a time for the leading records.
pub struct Enricher<'a> {
    api: &'a dyn IndexApi,
    config: EnrichmentConfig,
}

impl<'a> Enricher<'a> {
    pub fn new(api: &'a dyn IndexApi, config: EnrichmentConfig) -> Self {
        Self { api, config }
    }

    /// Whether the record at `position` in display order gets enriched.
    pub fn covers(&self, position: usize) -> bool {
        self.config.enabled && position < self.config.max_records
    }

    /// Enrich a single record shown at `position`.
    pub async fn enrich_one(&self, position: usize, record: &Record) -> Enrichment {
        if !self.covers(position) {
            return Enrichment::Skipped;
        }

        match self.api.description(&record.id).await {
            Ok(description) => {
                metrics::ENRICHMENT_FETCHES.with_label_values(&["ok"]).inc();
                let links = extract_links(&description);
                debug!(id = %record.id, links = links.len(), "Enriched record");
                Enrichment::Links(links)
            }
            Err(e) => {
                metrics::ENRICHMENT_FETCHES.with_label_values(&["error"]).inc();
                warn!(id = %record.id, error = %e, "Description fetch failed");
                Enrichment::Failed(e.to_string())
            }
        }
    }

    /// Enrich records in display order, sequentially. The output has one
    /// entry per input record.
    pub async fn enrich(&self, records: &[Record]) -> Vec<Enrichment> {
        let mut out = Vec::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            out.push(self.enrich_one(position, record).await);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::searcher::TransportError;
    use crate::testing::{fixtures, MockIndexApi};

    #[test]
    fn test_extract_links() {
        let descr = "Great release\n\
                     Screens: https://img.example/1.png\n\
                     no link here\n  http://mirror.example/sample.mkv  \n\
                     ftp://old.example";
        assert_eq!(
            extract_links(descr),
            vec![
                "Screens: https://img.example/1.png".to_string(),
                "http://mirror.example/sample.mkv".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_links_handles_crlf_and_empty() {
        assert!(extract_links("").is_empty());
        assert_eq!(
            extract_links("a\r\nhttps://x.example\r\nb"),
            vec!["https://x.example".to_string()]
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = EnrichmentConfig::default();
        assert!(config.enabled);
        assert_eq!(config.max_records, 100);
    }

    #[tokio::test]
    async fn test_enrich_respects_cap() {
        let api = MockIndexApi::new();
        api.set_description("1", "see https://a.example").await;
        api.set_description("2", "see https://b.example").await;
        let records = vec![
            fixtures::record("1", "One", "Alice"),
            fixtures::record("2", "Two", "Alice"),
            fixtures::record("3", "Three", "Alice"),
        ];
        let config = EnrichmentConfig {
            enabled: true,
            max_records: 2,
        };

        let enriched = Enricher::new(&api, config).enrich(&records).await;

        assert_eq!(enriched.len(), 3);
        assert_eq!(enriched[0].links(), &["see https://a.example".to_string()]);
        assert_eq!(enriched[1].links(), &["see https://b.example".to_string()]);
        assert_eq!(enriched[2], Enrichment::Skipped);
        assert_eq!(api.recorded_descriptions().await, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_later_records() {
        let api = MockIndexApi::new();
        api.fail_description("1", TransportError::Timeout).await;
        api.set_description("2", "https://ok.example").await;
        let records = vec![
            fixtures::record("1", "One", "Alice"),
            fixtures::record("2", "Two", "Alice"),
        ];

        let enriched = Enricher::new(&api, EnrichmentConfig::default())
            .enrich(&records)
            .await;

        assert!(matches!(enriched[0], Enrichment::Failed(_)));
        assert_eq!(enriched[1].links(), &["https://ok.example".to_string()]);
    }

    #[tokio::test]
    async fn test_disabled_skips_everything() {
        let api = MockIndexApi::new();
        let config = EnrichmentConfig {
            enabled: false,
            ..EnrichmentConfig::default()
        };
        let records = vec![fixtures::record("1", "One", "Alice")];

        let enriched = Enricher::new(&api, config).enrich(&records).await;

        assert_eq!(enriched, vec![Enrichment::Skipped]);
        assert!(api.recorded_descriptions().await.is_empty());
    }
}
