//! Configuration for the liveness check.

use serde::{Deserialize, Serialize};

/// Configuration for probing detail pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LivenessConfig {
    /// Whole-batch retries after the first failed attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Pause before re-issuing a failed batch, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Maximum probes in flight at once.
    #[serde(default = "default_max_concurrent_probes")]
    pub max_concurrent_probes: usize,

    /// Deadline for a single probe, in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Accept self-signed or mismatched certificates. Mirror sites often
    /// serve broken TLS.
    #[serde(default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_max_concurrent_probes() -> usize {
    32
}

fn default_probe_timeout_ms() -> u64 {
    10_000
}

fn default_accept_invalid_certs() -> bool {
    true
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            max_concurrent_probes: default_max_concurrent_probes(),
            probe_timeout_ms: default_probe_timeout_ms(),
            accept_invalid_certs: default_accept_invalid_certs(),
        }
    }
}

impl LivenessConfig {
    /// Total batch attempts, counting the first one.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Sets the retry delay.
    pub fn with_retry_delay_ms(mut self, ms: u64) -> Self {
        self.retry_delay_ms = ms;
        self
    }

    /// Sets the concurrency bound.
    pub fn with_max_concurrent_probes(mut self, n: usize) -> Self {
        self.max_concurrent_probes = n;
        self
    }

    /// Sets the per-probe deadline.
    pub fn with_probe_timeout_ms(mut self, ms: u64) -> Self {
        self.probe_timeout_ms = ms;
        self
    }
}
