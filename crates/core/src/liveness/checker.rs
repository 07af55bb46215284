//! Concurrent detail-page probing with whole-batch retry.

use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, warn};

use crate::metrics;
use crate::searcher::{detail_url, DetailProbe, Record, TransportError};

use super::{LivenessConfig, LivenessOutcome, Verification};

/// Status code that marks a listing as dead.
const NOT_FOUND: u16 = 404;

/// Probes each record's detail page and drops the dead ones.
///
/// A batch is all-or-nothing: if any probe fails, the whole batch is
/// re-issued after a short pause. Once the retries are spent the records are
/// returned unverified.
pub struct LivenessChecker<P: DetailProbe> {
    probe: P,
    config: LivenessConfig,
}

impl<P: DetailProbe> LivenessChecker<P> {
    pub fn new(probe: P, config: LivenessConfig) -> Self {
        Self { probe, config }
    }

    /// Run the check against `site_url`.
    ///
    /// Output order matches input order regardless of the order in which
    /// probes complete.
    pub async fn check(&self, site_url: &str, records: Vec<Record>) -> LivenessOutcome {
        if records.is_empty() {
            return LivenessOutcome {
                records,
                verification: Verification::Filtered {
                    attempts: 0,
                    dropped: 0,
                },
            };
        }

        let retry_delay = Duration::from_millis(self.config.retry_delay_ms);
        let mut attempt: u32 = 1;

        loop {
            let start = Instant::now();
            let result = self.run_batch(site_url, &records).await;
            let elapsed = start.elapsed().as_secs_f64();

            match result {
                Ok(codes) => {
                    metrics::PROBE_BATCHES.with_label_values(&["success"]).inc();
                    metrics::PROBE_BATCH_DURATION
                        .with_label_values(&["success"])
                        .observe(elapsed);

                    let total = records.len();
                    let alive: Vec<Record> = records
                        .into_iter()
                        .zip(codes)
                        .filter_map(|(mut record, code)| {
                            record.code = Some(code);
                            (code != NOT_FOUND).then_some(record)
                        })
                        .collect();
                    let dropped = total - alive.len();
                    metrics::DEAD_RECORDS.inc_by(dropped as u64);

                    info!(
                        attempt = attempt,
                        working = alive.len(),
                        dropped = dropped,
                        "Liveness check complete"
                    );

                    return LivenessOutcome {
                        records: alive,
                        verification: Verification::Filtered { attempts: attempt, dropped },
                    };
                }
                Err(e) => {
                    metrics::PROBE_BATCHES.with_label_values(&["failure"]).inc();
                    metrics::PROBE_BATCH_DURATION
                        .with_label_values(&["failure"])
                        .observe(elapsed);

                    if attempt > self.config.max_retries {
                        metrics::VERIFICATION_FALLBACKS.inc();
                        warn!(
                            attempts = attempt,
                            error = %e,
                            "Could not filter dead listings, continuing with all results"
                        );
                        return LivenessOutcome {
                            records,
                            verification: Verification::Unverified {
                                attempts: attempt,
                                last_error: e.to_string(),
                            },
                        };
                    }

                    warn!(
                        attempt = attempt,
                        max_retries = self.config.max_retries,
                        error = %e,
                        "Probe batch failed, retrying the whole batch"
                    );
                    tokio::time::sleep(retry_delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Probe every record once. Returns codes in input order, or the first
    /// error encountered; remaining in-flight probes are dropped on error.
    async fn run_batch(&self, site_url: &str, records: &[Record]) -> Result<Vec<u16>, TransportError> {
        let deadline = Duration::from_millis(self.config.probe_timeout_ms);
        let limit = self.config.max_concurrent_probes.max(1);

        debug!(records = records.len(), limit = limit, "Dispatching probe batch");

        let results: Vec<(usize, u16)> = stream::iter(records.iter().enumerate())
            .map(|(idx, record)| {
                let url = detail_url(site_url, &record.id);
                async move {
                    let code = tokio::time::timeout(deadline, self.probe.probe(&url))
                        .await
                        .map_err(|_| TransportError::Timeout)??;
                    Ok::<_, TransportError>((idx, code))
                }
            })
            .buffer_unordered(limit)
            .try_collect()
            .await?;

        let mut codes: Vec<Option<u16>> = vec![None; records.len()];
        for (idx, code) in results {
            codes[idx] = Some(code);
        }

        codes
            .into_iter()
            .map(|code| code.ok_or_else(|| TransportError::Other("missing probe result".to_string())))
            .collect()
    }
}
