//! Feed Aggregator Service
//!
//! Background service that polls the configured movie feeds and publishes
//! the combined list. A cycle either publishes every feed's records or
//! nothing at all; failures only flip the snapshot to unavailable.

use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use posterfy_core::{FeedSnapshot, MovieRecord};
use posterfy_feeds::{feed_plan, FeedDescriptor, FeedError, Fetcher, PosterfyConfig};

use crate::snapshot_store::SnapshotStore;

/// A feed that failed during a cycle
#[derive(Debug)]
struct CycleFailure {
    feed: Option<FeedDescriptor>,
    error: FeedError,
}

/// Runs refresh cycles and owns the published snapshot
pub struct FeedAggregator {
    fetcher: Arc<dyn Fetcher>,
    store: Arc<SnapshotStore>,
    config: PosterfyConfig,
}

impl FeedAggregator {
    /// Create a new FeedAggregator
    pub fn new(fetcher: Arc<dyn Fetcher>, store: Arc<SnapshotStore>, config: PosterfyConfig) -> Self {
        info!(
            "Initializing FeedAggregator '{}' for {} feeds",
            config.name,
            config.source.kind()
        );
        Self {
            fetcher,
            store,
            config,
        }
    }

    pub fn config(&self) -> &PosterfyConfig {
        &self.config
    }

    /// Currently published snapshot
    pub fn snapshot(&self) -> Arc<FeedSnapshot> {
        self.store.current()
    }

    /// Start the background refresh loop.
    ///
    /// The first cycle runs immediately, then once per scan interval.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        info!(
            "Starting FeedAggregator with refresh interval {}m",
            self.config.scan_interval.as_secs() / 60
        );

        tokio::spawn(async move {
            let mut ticker = interval(self.config.scan_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                self.refresh().await;
            }
        })
    }

    /// Run one refresh cycle dated today (local time)
    pub async fn refresh(&self) -> Arc<FeedSnapshot> {
        self.refresh_on(Local::now().date_naive()).await
    }

    /// Run one refresh cycle as if today were `today`
    pub async fn refresh_on(&self, today: NaiveDate) -> Arc<FeedSnapshot> {
        match self.run_cycle(today).await {
            Ok(movies) => {
                info!("Refreshed '{}': {} movies", self.config.name, movies.len());
                self.store.publish(movies, Utc::now())
            }
            Err(failure) => {
                match &failure.feed {
                    Some(feed) => error!(
                        kind = %failure.error.kind(),
                        "Error retrieving {}/{} feed for '{}': {}",
                        feed.platform,
                        feed.category,
                        self.config.name,
                        failure.error
                    ),
                    None => error!(
                        kind = %failure.error.kind(),
                        "Error planning feeds for '{}': {}",
                        self.config.name,
                        failure.error
                    ),
                }
                self.store.mark_unavailable()
            }
        }
    }

    /// Fetch and extract every feed in order, buffering locally
    async fn run_cycle(&self, today: NaiveDate) -> Result<Vec<MovieRecord>, CycleFailure> {
        let feeds = feed_plan(&self.config, today).map_err(|error| CycleFailure { feed: None, error })?;

        let mut movies = Vec::new();

        for feed in feeds {
            match self.fetch_feed(&feed).await {
                Ok(records) => {
                    debug!(
                        "Fetched {} movies from {}/{}",
                        records.len(),
                        feed.platform,
                        feed.category
                    );
                    movies.extend(records);
                }
                Err(error) => {
                    return Err(CycleFailure {
                        feed: Some(feed),
                        error,
                    })
                }
            }
        }

        Ok(movies)
    }

    async fn fetch_feed(&self, feed: &FeedDescriptor) -> Result<Vec<MovieRecord>, FeedError> {
        let payload = self
            .fetcher
            .fetch(&feed.url, feed.kind.payload_format())
            .await?;
        feed.kind.extract(&payload, feed.platform, feed.category)
    }
}
