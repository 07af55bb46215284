//! Mock detail page probe for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::searcher::{DetailProbe, TransportError};

/// Mock implementation of the `DetailProbe` trait.
///
/// Unknown URLs answer 200. Supports per-URL codes, failures and delays,
/// a counter of calls that fail before normal behavior resumes, and
/// tracking of the peak number of probes in flight.
#[derive(Debug, Clone, Default)]
pub struct MockProbe {
    codes: Arc<RwLock<HashMap<String, u16>>>,
    failures: Arc<RwLock<HashMap<String, TransportError>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    default_delay: Arc<RwLock<Option<Duration>>>,
    /// Remaining calls that fail regardless of URL.
    fail_next: Arc<RwLock<Option<(u32, TransportError)>>>,
    calls: Arc<RwLock<Vec<String>>>,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

/// Decrements the in-flight counter when a probe finishes or is dropped.
struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `code` for `url`.
    pub async fn set_code(&self, url: &str, code: u16) {
        self.codes.write().await.insert(url.to_string(), code);
    }

    /// Always fail probes of `url`.
    pub async fn fail_url(&self, url: &str, error: TransportError) {
        self.failures.write().await.insert(url.to_string(), error);
    }

    /// Delay the answer for `url`.
    pub async fn set_delay(&self, url: &str, delay: Duration) {
        self.delays.write().await.insert(url.to_string(), delay);
    }

    /// Delay every answer without a URL-specific delay.
    pub async fn set_default_delay(&self, delay: Duration) {
        *self.default_delay.write().await = Some(delay);
    }

    /// Fail the next `count` calls with `error`, whatever their URL.
    pub async fn fail_next_calls(&self, count: u32, error: TransportError) {
        *self.fail_next.write().await = Some((count, error));
    }

    /// Number of probe calls made.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// URLs probed, in call order.
    pub async fn recorded_calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    /// Highest number of probes that were in flight at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    async fn take_forced_failure(&self) -> Option<TransportError> {
        let mut fail_next = self.fail_next.write().await;
        match fail_next.as_mut() {
            Some((remaining, error)) if *remaining > 0 => {
                *remaining -= 1;
                Some(error.clone())
            }
            _ => None,
        }
    }
}

#[async_trait]
impl DetailProbe for MockProbe {
    async fn probe(&self, url: &str) -> Result<u16, TransportError> {
        self.calls.write().await.push(url.to_string());

        if let Some(err) = self.take_forced_failure().await {
            return Err(err);
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard(self.in_flight.clone());

        let delay = match self.delays.read().await.get(url) {
            Some(d) => Some(*d),
            None => *self.default_delay.read().await,
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.failures.read().await.get(url) {
            return Err(err.clone());
        }

        Ok(self.codes.read().await.get(url).copied().unwrap_or(200))
    }
}
