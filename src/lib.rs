//! Gazette - RSS/Atom feed aggregator
//!
//! Users subscribe to web feeds over an HTTP API while a background
//! scheduler keeps re-fetching those feeds and storing their items.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod feed;
pub mod logging;
pub mod web;

pub use auth::{authenticate, parse_authorization, register};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{GazetteError, Result};
pub use feed::{
    CreateFeedOutcome, CycleReport, Feed, FeedFollow, FeedScheduler, FeedSource, HttpFeedFetcher,
    ParsedItem, Post, SchedulerHandle, SubscriptionService,
};
