//! Feed module for Gazette.
//!
//! This module provides feed subscriptions, fetching and the background
//! ingestion scheduler.

pub mod fetcher;
pub mod repository;
pub mod scheduler;
pub mod service;
pub mod types;

pub use fetcher::{parse_feed, validate_url, FeedSource, HttpFeedFetcher};
pub use repository::{FeedFollowRepository, FeedRepository, PostRepository};
pub use scheduler::{CycleReport, FeedScheduler, SchedulerHandle};
pub use service::{CreateFeedOutcome, SubscriptionService, DEFAULT_POST_LIMIT, MAX_POST_LIMIT};
pub use types::{Feed, FeedFollow, NewFeed, NewPost, ParsedItem, Post};
