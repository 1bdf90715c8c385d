//! Published view of the most recent refresh cycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::MovieRecord;

/// Aggregated movie list plus freshness and availability metadata.
///
/// Snapshots are immutable once built; a refresh cycle produces a new one
/// rather than editing the current one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedSnapshot {
    /// Records in feed-processing order
    pub movies: Vec<MovieRecord>,
    /// Completion time of the last successful cycle
    pub last_refreshed: Option<DateTime<Utc>>,
    /// False when the most recent cycle failed
    pub available: bool,
}

impl FeedSnapshot {
    /// Snapshot published before any cycle has run
    pub fn initial() -> Self {
        Self {
            movies: Vec::new(),
            last_refreshed: None,
            available: true,
        }
    }

    /// Result of a successful cycle
    pub fn refreshed(movies: Vec<MovieRecord>, at: DateTime<Utc>) -> Self {
        Self {
            movies,
            last_refreshed: Some(at),
            available: true,
        }
    }

    /// Same data, flagged stale after a failed cycle
    pub fn unavailable(&self) -> Self {
        Self {
            movies: self.movies.clone(),
            last_refreshed: self.last_refreshed,
            available: false,
        }
    }
}

impl Default for FeedSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}
