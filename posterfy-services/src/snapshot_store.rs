//! Snapshot Store
//!
//! Holds the currently published [`FeedSnapshot`]. Every update swaps in a
//! whole new snapshot, so readers always see a complete cycle's result.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use posterfy_core::{FeedSnapshot, MovieRecord};

/// Shared holder for the published snapshot
#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<Arc<FeedSnapshot>>,
}

impl SnapshotStore {
    /// Create a store holding the initial (empty, available) snapshot
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(FeedSnapshot::initial())),
        }
    }

    /// Currently published snapshot
    pub fn current(&self) -> Arc<FeedSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Replace the snapshot with a successful cycle's result
    pub fn publish(&self, movies: Vec<MovieRecord>, at: DateTime<Utc>) -> Arc<FeedSnapshot> {
        let snapshot = Arc::new(FeedSnapshot::refreshed(movies, at));
        *self.current.write() = Arc::clone(&snapshot);
        debug!("Published snapshot with {} movies", snapshot.movies.len());
        snapshot
    }

    /// Flag the cached snapshot as unavailable, keeping its data
    pub fn mark_unavailable(&self) -> Arc<FeedSnapshot> {
        let mut current = self.current.write();
        let snapshot = Arc::new(current.unavailable());
        *current = Arc::clone(&snapshot);
        snapshot
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posterfy_core::{Category, Platform};

    fn record(title: &str) -> MovieRecord {
        MovieRecord::new(
            Platform::Tmdb,
            Category::ComingSoon,
            title,
            Some("2024-07-01".to_string()),
            format!("https://image.tmdb.org/t/p/w780/{}.jpg", title),
        )
    }

    #[test]
    fn test_publish_replaces_whole_snapshot() {
        let store = SnapshotStore::new();
        let at = Utc::now();

        store.publish(vec![record("a"), record("b")], at);
        store.publish(vec![record("c")], at);

        let current = store.current();
        assert_eq!(current.movies, vec![record("c")]);
        assert_eq!(current.last_refreshed, Some(at));
        assert!(current.available);
    }

    #[test]
    fn test_readers_keep_their_snapshot() {
        let store = SnapshotStore::new();
        store.publish(vec![record("old")], Utc::now());

        let held = store.current();
        store.publish(vec![record("new")], Utc::now());

        assert_eq!(held.movies, vec![record("old")]);
        assert_eq!(store.current().movies, vec![record("new")]);
    }

    #[test]
    fn test_mark_unavailable_keeps_stale_data() {
        let store = SnapshotStore::new();
        let at = Utc::now();
        store.publish(vec![record("a")], at);

        let snapshot = store.mark_unavailable();

        assert!(!snapshot.available);
        assert_eq!(snapshot.movies, vec![record("a")]);
        assert_eq!(snapshot.last_refreshed, Some(at));
        assert_eq!(store.current(), snapshot);
    }
}
