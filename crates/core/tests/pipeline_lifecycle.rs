//! Pipeline lifecycle integration tests.
//!
//! These tests drive the full pipeline with mock index and probe services:
//! - Uploader filtering and deduplication feeding the liveness check
//! - Dead listing removal and whole-batch retry
//! - Fallback to unverified results
//! - Re-sorting and enrichment of the final order

use seeker_core::{
    testing::{fixtures, MockIndexApi, MockProbe},
    EnrichmentConfig, Enrichment, LivenessConfig, Pipeline, SearchContext, SortKey, Sorter,
    TransportError, Verification, UNVERIFIED_NOTICE,
};

const SITE: &str = "https://site.example";

/// Test helper holding the pipeline and handles on its mocks.
struct TestHarness {
    pipeline: Pipeline<MockIndexApi, MockProbe>,
    api: MockIndexApi,
    probe: MockProbe,
}

impl TestHarness {
    fn new() -> Self {
        Self::with_enrichment(EnrichmentConfig::default())
    }

    fn with_enrichment(enrichment: EnrichmentConfig) -> Self {
        let api = MockIndexApi::new();
        let probe = MockProbe::new();
        let liveness = LivenessConfig::default()
            .with_retry_delay_ms(0)
            .with_max_concurrent_probes(4);

        let pipeline = Pipeline::new(api.clone(), probe.clone(), liveness, enrichment);

        Self {
            pipeline,
            api,
            probe,
        }
    }

    fn url(id: &str) -> String {
        format!("{}/torrent/{}", SITE, id)
    }
}

fn context(uploaders: &[&str], terms: &[&str]) -> SearchContext {
    SearchContext::normalized(SITE, uploaders.iter(), terms.iter())
}

#[tokio::test]
async fn test_single_unique_alice_record_reaches_liveness() {
    let h = TestHarness::new();
    h.api
        .set_listings(
            "linux",
            vec![
                fixtures::listing("1", "Debian", "Alice"),
                fixtures::listing("1", "Debian", "Alice"),
                fixtures::listing("2", "Arch", "Bob"),
            ],
        )
        .await;

    let report = h
        .pipeline
        .run(&context(&["alice"], &["Linux"]), SortKey::Newest, &mut Sorter::seeded(1))
        .await
        .unwrap();

    assert_eq!(h.api.recorded_terms().await, vec!["linux"]);
    assert_eq!(h.probe.recorded_calls().await, vec![TestHarness::url("1")]);
    assert_eq!(report.collected, 2);
    assert_eq!(report.unique, 1);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results.records()[0].username, "Alice");
}

#[tokio::test]
async fn test_mixed_status_codes_drop_only_dead() {
    let h = TestHarness::new();
    h.api
        .set_listings(
            "linux",
            vec![
                fixtures::listing("1", "Gone", "Alice"),
                fixtures::listing("2", "Fine", "Alice"),
                fixtures::listing("3", "Erroring", "Alice"),
            ],
        )
        .await;
    h.probe.set_code(&TestHarness::url("1"), 404).await;
    h.probe.set_code(&TestHarness::url("2"), 200).await;
    h.probe.set_code(&TestHarness::url("3"), 500).await;

    let report = h
        .pipeline
        .run(&context(&["Alice"], &["linux"]), SortKey::Oldest, &mut Sorter::seeded(1))
        .await
        .unwrap();

    let codes: Vec<_> = report
        .results
        .records()
        .iter()
        .map(|r| (r.id.to_string(), r.code))
        .collect();
    assert_eq!(
        codes,
        vec![("2".to_string(), Some(200)), ("3".to_string(), Some(500))]
    );
    assert_eq!(report.dead_dropped(), 1);
    assert!(report.results.verification().notice().is_none());
}

#[tokio::test]
async fn test_persistent_probe_failure_returns_unverified() {
    let h = TestHarness::new();
    h.api
        .set_listings(
            "linux",
            vec![
                fixtures::listing("1", "One", "Alice"),
                fixtures::listing("2", "Two", "Alice"),
            ],
        )
        .await;
    h.probe
        .fail_url(&TestHarness::url("1"), TransportError::Timeout)
        .await;
    h.probe
        .fail_url(
            &TestHarness::url("2"),
            TransportError::Connection("reset".to_string()),
        )
        .await;

    let report = h
        .pipeline
        .run(&context(&["Alice"], &["linux"]), SortKey::Oldest, &mut Sorter::seeded(1))
        .await
        .unwrap();

    assert_eq!(report.results.len(), 2);
    assert!(report.results.records().iter().all(|r| r.code.is_none()));
    assert_eq!(report.results.verification().attempts(), 4);
    assert_eq!(report.results.verification().notice(), Some(UNVERIFIED_NOTICE));
    assert_eq!(report.dead_dropped(), 0);
}

#[tokio::test]
async fn test_transient_probe_failure_recovers() {
    let h = TestHarness::new();
    h.api
        .set_listings("linux", vec![fixtures::listing("1", "One", "Alice")])
        .await;
    h.probe
        .fail_next_calls(3, TransportError::Other("server disconnected".to_string()))
        .await;

    let report = h
        .pipeline
        .run(&context(&["Alice"], &["linux"]), SortKey::Newest, &mut Sorter::seeded(1))
        .await
        .unwrap();

    assert_eq!(
        report.results.verification(),
        &Verification::Filtered {
            attempts: 4,
            dropped: 0
        }
    );
    assert_eq!(report.results.records()[0].code, Some(200));
}

#[tokio::test]
async fn test_failed_term_is_reported_and_skipped() {
    let h = TestHarness::new();
    h.api.fail_term("bsd", TransportError::Status(503)).await;
    h.api
        .set_listings("linux", vec![fixtures::listing("1", "Debian", "Alice")])
        .await;

    let report = h
        .pipeline
        .run(
            &context(&["Alice"], &["bsd", "linux"]),
            SortKey::Newest,
            &mut Sorter::seeded(1),
        )
        .await
        .unwrap();

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.term_errors.len(), 1);
    assert_eq!(report.term_errors[0].term, "bsd");
}

#[tokio::test]
async fn test_resort_and_enrich_final_order() {
    let h = TestHarness::with_enrichment(EnrichmentConfig {
        enabled: true,
        max_records: 1,
    });
    let mut small = fixtures::listing("1", "Small", "Alice");
    small.size = seeker_core::searcher::WireNumber::Text("10".to_string());
    let mut big = fixtures::listing("2", "Big", "Alice");
    big.size = seeker_core::searcher::WireNumber::Text("9000".to_string());
    h.api.set_listings("linux", vec![small, big]).await;
    h.api
        .set_description("1", "Screens:\nhttps://img.example/small.png")
        .await;
    h.api
        .set_description("2", "Screens:\nhttps://img.example/big.png")
        .await;

    let mut sorter = Sorter::seeded(5);
    let mut report = h
        .pipeline
        .run(&context(&["Alice"], &["linux"]), SortKey::Smallest, &mut sorter)
        .await
        .unwrap();

    let names: Vec<_> = report.results.records().iter().map(|r| r.name.clone()).collect();
    assert_eq!(names, vec!["Small", "Big"]);

    report.results.sort_by(SortKey::Largest, &mut sorter);
    let names: Vec<_> = report.results.records().iter().map(|r| r.name.clone()).collect();
    assert_eq!(names, vec!["Big", "Small"]);

    // Re-sorting must not re-run any network stage.
    assert_eq!(h.api.recorded_terms().await.len(), 1);
    assert_eq!(h.probe.call_count().await, 2);

    let enriched = h.pipeline.enricher().enrich(report.results.records()).await;
    assert_eq!(
        enriched,
        vec![
            Enrichment::Links(vec!["https://img.example/big.png".to_string()]),
            Enrichment::Skipped,
        ]
    );
    assert_eq!(h.api.recorded_descriptions().await, vec!["2"]);
}

#[tokio::test]
async fn test_no_matches_yields_empty_filtered_set() {
    let h = TestHarness::new();
    h.api
        .set_listings("linux", vec![fixtures::placeholder_listing()])
        .await;

    let report = h
        .pipeline
        .run(&context(&["Alice"], &["linux"]), SortKey::Random, &mut Sorter::seeded(1))
        .await
        .unwrap();

    assert!(report.results.is_empty());
    assert!(report.results.verification().is_filtered());
    assert_eq!(h.probe.call_count().await, 0);
}
