//! Service layer for Posterfy
//!
//! Runs refresh cycles over the configured feeds and publishes the result
//! as an atomically replaced snapshot.

pub mod feed_aggregator;
pub mod snapshot_store;

pub use feed_aggregator::FeedAggregator;
pub use snapshot_store::SnapshotStore;
