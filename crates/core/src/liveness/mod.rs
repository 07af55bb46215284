//! Liveness checking of listing detail pages.

mod checker;
mod config;
mod http_probe;
mod types;

pub use checker::LivenessChecker;
pub use config::LivenessConfig;
pub use http_probe::HttpProbe;
pub use types::{LivenessOutcome, Verification, UNVERIFIED_NOTICE};
