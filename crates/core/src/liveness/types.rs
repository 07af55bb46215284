//! Types produced by the liveness check.

use serde::{Deserialize, Serialize};

use crate::searcher::Record;

/// Message shown when verification was abandoned.
pub const UNVERIFIED_NOTICE: &str = "Could not filter dead URLs, showing all";

/// How the liveness check ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Verification {
    /// Every record was probed; 404s were removed.
    Filtered { attempts: u32, dropped: usize },
    /// Every attempt failed; records are passed through with `code` unset.
    Unverified { attempts: u32, last_error: String },
}

impl Verification {
    pub fn is_filtered(&self) -> bool {
        matches!(self, Verification::Filtered { .. })
    }

    /// Batch attempts made, including the successful one.
    pub fn attempts(&self) -> u32 {
        match self {
            Verification::Filtered { attempts, .. } | Verification::Unverified { attempts, .. } => {
                *attempts
            }
        }
    }

    /// User-facing notice for the fallback case.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Verification::Filtered { .. } => None,
            Verification::Unverified { .. } => Some(UNVERIFIED_NOTICE),
        }
    }
}

/// Records handed on to sorting, with the verification result.
#[derive(Debug, Clone)]
pub struct LivenessOutcome {
    pub records: Vec<Record>,
    pub verification: Verification,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_only_for_unverified() {
        let ok = Verification::Filtered {
            attempts: 1,
            dropped: 0,
        };
        assert!(ok.is_filtered());
        assert!(ok.notice().is_none());

        let fallback = Verification::Unverified {
            attempts: 4,
            last_error: "Request timed out".to_string(),
        };
        assert!(!fallback.is_filtered());
        assert_eq!(fallback.attempts(), 4);
        assert_eq!(
            fallback.notice(),
            Some("Could not filter dead URLs, showing all")
        );
    }

    #[test]
    fn test_verification_serialization() {
        let v = Verification::Filtered {
            attempts: 2,
            dropped: 5,
        };
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains("\"mode\":\"filtered\""));
        let parsed: Verification = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, v);
    }
}
