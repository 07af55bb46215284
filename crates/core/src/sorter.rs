//! Ordering of result sets.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::searcher::Record;

/// Key to order results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum SortKey {
    /// Upload time, latest first.
    #[default]
    Newest,
    /// Upload time, earliest first.
    Oldest,
    /// Seeders, most first.
    MostSeeded,
    /// Size, biggest first.
    Largest,
    /// Size, smallest first.
    Smallest,
    /// Uniform shuffle.
    Random,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::MostSeeded,
        SortKey::Largest,
        SortKey::Smallest,
        SortKey::Random,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::MostSeeded => "most-seeded",
            SortKey::Largest => "largest",
            SortKey::Smallest => "smallest",
            SortKey::Random => "random",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown sort key: {0:?} (expected newest, oldest, most-seeded, largest, smallest or random)")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    /// Accepts the long names and the single-letter menu codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" | "n" => Ok(SortKey::Newest),
            "oldest" | "o" => Ok(SortKey::Oldest),
            "most-seeded" | "most_seeded" | "seeded" | "s" => Ok(SortKey::MostSeeded),
            "largest" | "l" => Ok(SortKey::Largest),
            "smallest" | "m" => Ok(SortKey::Smallest),
            "random" | "r" => Ok(SortKey::Random),
            _ => Err(UnknownSortKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for SortKey {
    type Error = UnknownSortKey;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Sorts records in place. Holds the RNG used for `Random`, so successive
/// shuffles differ while a seeded sorter stays reproducible.
pub struct Sorter {
    rng: StdRng,
}

impl Sorter {
    /// A sorter with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A sorter seeded from the OS.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the RNG seed.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Order `records` by `key`. Non-random orderings are stable.
    pub fn sort(&mut self, records: &mut [Record], key: SortKey) {
        match key {
            SortKey::Newest => records.sort_by_key(|r| Reverse(r.added)),
            SortKey::Oldest => records.sort_by_key(|r| r.added),
            SortKey::MostSeeded => records.sort_by_key(|r| Reverse(r.seeders)),
            SortKey::Largest => records.sort_by_key(|r| Reverse(r.size)),
            SortKey::Smallest => records.sort_by_key(|r| r.size),
            SortKey::Random => records.shuffle(&mut self.rng),
        }
    }
}

impl Default for Sorter {
    fn default() -> Self {
        Self::from_entropy()
    }
}
