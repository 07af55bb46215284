//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the remote service traits,
//! allowing the whole pipeline to be exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use seeker_core::testing::{fixtures, MockIndexApi, MockProbe};
//!
//! let api = MockIndexApi::new();
//! let probe = MockProbe::new();
//!
//! // Configure mock responses
//! api.set_listings("linux", vec![fixtures::listing("1", "Debian", "Alice")]).await;
//! probe.set_code("https://example.org/torrent/1", 404).await;
//! ```

mod mock_index_api;
mod mock_probe;

pub use mock_index_api::MockIndexApi;
pub use mock_probe::MockProbe;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::searcher::{ApiListing, Record, RecordId, WireNumber};

    /// Create a wire listing with reasonable defaults.
    pub fn listing(id: &str, name: &str, username: &str) -> ApiListing {
        ApiListing {
            id: RecordId::from(id),
            name: name.to_string(),
            username: username.to_string(),
            status: "trusted".to_string(),
            size: WireNumber::Text("1048576".to_string()), // 1 MiB
            added: WireNumber::Text("1700000000".to_string()),
            seeders: WireNumber::Text("10".to_string()),
            info_hash: format!("HASH{}", id),
        }
    }

    /// The listing the index returns when a search has no hits.
    pub fn placeholder_listing() -> ApiListing {
        ApiListing {
            id: RecordId::from("0"),
            name: "No results returned".to_string(),
            username: String::new(),
            status: "member".to_string(),
            size: WireNumber::Text("0".to_string()),
            added: WireNumber::Text("0".to_string()),
            seeders: WireNumber::Text("0".to_string()),
            info_hash: "0000000000000000000000000000000000000000".to_string(),
        }
    }

    /// Create a normalized record matching [`listing`].
    pub fn record(id: &str, name: &str, username: &str) -> Record {
        Record {
            id: RecordId::from(id),
            name: name.to_string(),
            username: username.to_string(),
            status: "trusted".to_string(),
            size: 1_048_576,
            added: 1_700_000_000,
            seeders: 10,
            info_hash: format!("HASH{}", id),
            code: None,
        }
    }

    /// Create a record with explicit sort keys.
    pub fn sized_record(id: &str, added: i64, seeders: u64, size: u64) -> Record {
        Record {
            added,
            seeders,
            size,
            ..record(id, &format!("Record {}", id), "Alice")
        }
    }
}
