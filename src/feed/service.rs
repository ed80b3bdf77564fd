//! Subscription service for Gazette.
//!
//! This module owns the create-or-attach protocol for feeds: a request to
//! create a feed whose URL already exists becomes a follow of the existing
//! feed instead of a failure.

use tracing::{error, info};
use uuid::Uuid;

use super::repository::{FeedFollowRepository, FeedRepository, PostRepository};
use super::types::{Feed, FeedFollow, NewFeed, Post};
use crate::db::{Database, User};
use crate::{GazetteError, Result};

/// Default number of posts returned for a user.
pub const DEFAULT_POST_LIMIT: u32 = 20;

/// Maximum number of posts returned for a user.
pub const MAX_POST_LIMIT: u32 = 100;

/// Result of [`SubscriptionService::create_feed`].
#[derive(Debug, Clone, PartialEq)]
pub enum CreateFeedOutcome {
    /// A new feed was created and the caller follows it.
    Created { feed: Feed, follow: FeedFollow },
    /// The URL already had a feed; the caller now follows that one.
    Attached { follow: FeedFollow },
}

impl CreateFeedOutcome {
    /// The follow created for the caller.
    pub fn follow(&self) -> &FeedFollow {
        match self {
            CreateFeedOutcome::Created { follow, .. } | CreateFeedOutcome::Attached { follow } => {
                follow
            }
        }
    }
}

/// Service for feed and subscription operations.
pub struct SubscriptionService<'a> {
    db: &'a Database,
}

impl<'a> SubscriptionService<'a> {
    /// Create a new SubscriptionService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a feed at `url` and follow it, or follow the existing feed.
    ///
    /// No pre-check is made: the unique constraint on `feeds.url` decides
    /// which of two concurrent requests creates the feed. The existing feed's
    /// name and owner are never changed.
    ///
    /// # Errors
    ///
    /// - `Validation` if `name` or `url` is blank
    /// - `Database` on any other store failure
    pub async fn create_feed(
        &self,
        user: &User,
        name: &str,
        url: &str,
    ) -> Result<CreateFeedOutcome> {
        let name = name.trim();
        let url = url.trim();
        if name.is_empty() {
            return Err(GazetteError::Validation("name cannot be empty".to_string()));
        }
        if url.is_empty() {
            return Err(GazetteError::Validation("url cannot be empty".to_string()));
        }

        let feeds = FeedRepository::new(self.db.pool());
        let follows = FeedFollowRepository::new(self.db.pool());

        match feeds.create(&NewFeed::new(name, url, user.id)).await {
            Ok(feed) => match follows.create(feed.id, user.id).await {
                Ok(follow) => {
                    info!("Feed {} created by user {}: {}", feed.id, user.id, feed.url);
                    Ok(CreateFeedOutcome::Created { feed, follow })
                }
                Err(e) => {
                    error!(
                        "Orphaned feed {} ({}): failed to create follow for user {}: {}",
                        feed.id, feed.url, user.id, e
                    );
                    Err(into_storage_error(e))
                }
            },
            Err(e) if e.is_conflict() => {
                info!("Duplicate feed url, following existing feed: {}", url);
                let existing = feeds.get_by_url(url).await?.ok_or_else(|| {
                    GazetteError::Database(format!("feed for {} vanished after conflict", url))
                })?;
                let follow = follows
                    .create(existing.id, user.id)
                    .await
                    .map_err(into_storage_error)?;
                Ok(CreateFeedOutcome::Attached { follow })
            }
            Err(e) => Err(into_storage_error(e)),
        }
    }

    /// Follow an existing feed. Repeated follows create separate rows.
    pub async fn follow_feed(&self, user: &User, feed_id: Uuid) -> Result<FeedFollow> {
        let feeds = FeedRepository::new(self.db.pool());
        if feeds.get_by_id(feed_id).await?.is_none() {
            return Err(GazetteError::NotFound("feed".to_string()));
        }

        FeedFollowRepository::new(self.db.pool())
            .create(feed_id, user.id)
            .await
    }

    /// List the user's follows (oldest first).
    pub async fn list_follows(&self, user: &User) -> Result<Vec<FeedFollow>> {
        FeedFollowRepository::new(self.db.pool())
            .list_by_user(user.id)
            .await
    }

    /// Delete a follow by ID.
    pub async fn unfollow(&self, follow_id: Uuid) -> Result<()> {
        let deleted = FeedFollowRepository::new(self.db.pool())
            .delete(follow_id)
            .await?;
        if !deleted {
            return Err(GazetteError::NotFound("feed follow".to_string()));
        }
        Ok(())
    }

    /// List all feeds (oldest first).
    pub async fn list_feeds(&self) -> Result<Vec<Feed>> {
        FeedRepository::new(self.db.pool()).list_all().await
    }

    /// List recent posts from the feeds the user follows.
    ///
    /// `limit` defaults to [`DEFAULT_POST_LIMIT`] and is clamped to
    /// `1..=MAX_POST_LIMIT`.
    pub async fn list_posts_for_user(&self, user: &User, limit: Option<u32>) -> Result<Vec<Post>> {
        let limit = limit
            .unwrap_or(DEFAULT_POST_LIMIT)
            .clamp(1, MAX_POST_LIMIT);
        PostRepository::new(self.db.pool())
            .list_for_user(user.id, limit)
            .await
    }
}

fn into_storage_error(e: GazetteError) -> GazetteError {
    match e {
        GazetteError::Database(_) => e,
        other => GazetteError::Database(other.to_string()),
    }
}
