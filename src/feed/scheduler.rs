//! Background feed ingestion scheduler.
//!
//! Every cycle the scheduler claims the least recently fetched feeds, fetches
//! each one through a [`FeedSource`] and stores the returned items as posts.
//! A failing feed never stops the loop.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, error, info, warn};

use super::fetcher::FeedSource;
use super::repository::{FeedRepository, PostRepository};
use super::types::{Feed, NewPost, ParsedItem};
use crate::config::SchedulerConfig;
use crate::db::Database;
use crate::{GazetteError, Result};

/// Outcome of a single scheduling cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Feeds claimed in this cycle.
    pub claimed: usize,
    /// Feeds fetched and parsed successfully.
    pub succeeded: usize,
    /// Feeds whose fetch failed or timed out.
    pub failed: usize,
    /// Posts stored across all feeds.
    pub posts_created: usize,
}

/// Signals a running [`FeedScheduler`] to stop.
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    shutdown: Arc<watch::Sender<bool>>,
}

impl SchedulerHandle {
    /// Request shutdown. The scheduler finishes the feed in progress and exits.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    /// Check whether shutdown has been requested.
    pub fn is_shutdown(&self) -> bool {
        *self.shutdown.borrow()
    }
}

/// Feed ingestion scheduler.
pub struct FeedScheduler {
    db: Arc<Database>,
    source: Arc<dyn FeedSource>,
    interval: Duration,
    batch_size: u32,
    fetch_timeout: Duration,
    shutdown_tx: Arc<watch::Sender<bool>>,
    shutdown_rx: watch::Receiver<bool>,
}

impl FeedScheduler {
    /// Create a scheduler from configuration.
    pub fn new(db: Arc<Database>, source: Arc<dyn FeedSource>, config: &SchedulerConfig) -> Self {
        Self::with_settings(
            db,
            source,
            Duration::from_secs(config.interval_secs),
            config.batch_size,
            Duration::from_secs(config.fetch_timeout_secs),
        )
    }

    /// Create a scheduler with explicit settings.
    pub fn with_settings(
        db: Arc<Database>,
        source: Arc<dyn FeedSource>,
        interval: Duration,
        batch_size: u32,
        fetch_timeout: Duration,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            db,
            source,
            interval,
            batch_size,
            fetch_timeout,
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        }
    }

    /// Get a handle that can stop this scheduler.
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            shutdown: Arc::clone(&self.shutdown_tx),
        }
    }

    fn is_shutdown(&self) -> bool {
        *self.shutdown_rx.borrow()
    }

    /// Spawn the scheduler loop as a background task.
    pub fn start(self) -> (SchedulerHandle, JoinHandle<()>) {
        let handle = self.handle();
        let task = tokio::spawn(self.run());
        (handle, task)
    }

    /// Run the scheduler loop until shutdown is requested.
    pub async fn run(mut self) {
        info!(
            "Feed scheduler started (interval: {} seconds, batch size: {})",
            self.interval.as_secs(),
            self.batch_size
        );

        while !self.is_shutdown() {
            match self.run_cycle().await {
                Ok(report) if report.claimed > 0 => info!(
                    "Cycle complete: {} claimed, {} succeeded, {} failed, {} post(s) stored",
                    report.claimed, report.succeeded, report.failed, report.posts_created
                ),
                Ok(_) => debug!("No feeds to fetch"),
                Err(e) => error!("Failed to select feeds to fetch: {}", e),
            }

            if self.is_shutdown() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.shutdown_rx.changed() => {}
            }
        }

        info!("Feed scheduler stopped");
    }

    /// Run a single cycle: select, claim, fetch and store.
    ///
    /// Only a failure to select the batch is returned as an error. Per-feed
    /// failures are logged and counted in the report.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let cycle_start = Utc::now();
        let feeds = FeedRepository::new(self.db.pool())
            .next_to_fetch(self.batch_size)
            .await?;

        let mut report = CycleReport::default();
        if feeds.is_empty() {
            return Ok(report);
        }

        debug!("Fetching {} feed(s)", feeds.len());

        for feed in feeds {
            if self.is_shutdown() {
                debug!("Shutdown requested, leaving remaining feeds unclaimed");
                break;
            }

            match FeedRepository::new(self.db.pool())
                .mark_fetched(feed.id, cycle_start)
                .await
            {
                Ok(true) => report.claimed += 1,
                Ok(false) => {
                    debug!("Feed {} already claimed, skipping", feed.id);
                    continue;
                }
                Err(e) => {
                    error!("Failed to claim feed {} ({}): {}", feed.id, feed.url, e);
                    continue;
                }
            }

            match self.fetch(&feed).await {
                Ok(items) => {
                    report.succeeded += 1;
                    report.posts_created += self.store_items(&feed, items).await;
                }
                Err(e) => {
                    report.failed += 1;
                    warn!("Failed to fetch feed {} ({}): {}", feed.id, feed.url, e);
                }
            }
        }

        Ok(report)
    }

    async fn fetch(&self, feed: &Feed) -> Result<Vec<ParsedItem>> {
        match tokio::time::timeout(self.fetch_timeout, self.source.fetch(&feed.url)).await {
            Ok(result) => result,
            Err(_) => Err(GazetteError::Fetch(format!(
                "timed out after {} ms",
                self.fetch_timeout.as_millis()
            ))),
        }
    }

    /// Store every item as a post. Returns the number stored.
    async fn store_items(&self, feed: &Feed, items: Vec<ParsedItem>) -> usize {
        let repo = PostRepository::new(self.db.pool());
        let mut stored = 0;

        for item in items {
            match repo.create(&NewPost::from_item(feed.id, item)).await {
                Ok(_) => stored += 1,
                Err(e) => error!("Failed to store post for feed {}: {}", feed.id, e),
            }
        }

        debug!("Feed {} fetched: {} post(s) stored", feed.id, stored);
        stored
    }
}
