//! Feed repositories for Gazette.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::types::{Feed, FeedFollow, NewFeed, NewPost, Post};
use crate::db::DbPool;
use crate::Result;

const FEED_COLUMNS: &str = "id, name, url, user_id, created_at, updated_at, last_fetched_at";
const FOLLOW_COLUMNS: &str = "id, feed_id, user_id, created_at, updated_at";
const POST_COLUMNS: &str =
    "id, feed_id, title, url, description, published_at, created_at, updated_at";

/// Repository for feed operations.
pub struct FeedRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> FeedRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new feed.
    ///
    /// Fails with `GazetteError::Conflict` when a feed with the same URL
    /// already exists.
    pub async fn create(&self, feed: &NewFeed) -> Result<Feed> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO feeds (id, name, url, user_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {}",
            FEED_COLUMNS
        );
        let created = sqlx::query_as::<_, Feed>(&query)
            .bind(Uuid::new_v4())
            .bind(&feed.name)
            .bind(&feed.url)
            .bind(feed.user_id)
            .bind(now)
            .bind(now)
            .fetch_one(self.pool)
            .await?;

        Ok(created)
    }

    /// Get a feed by ID.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Feed>> {
        let query = format!("SELECT {} FROM feeds WHERE id = ?", FEED_COLUMNS);
        let feed = sqlx::query_as::<_, Feed>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(feed)
    }

    /// Get a feed by exact URL.
    pub async fn get_by_url(&self, url: &str) -> Result<Option<Feed>> {
        let query = format!("SELECT {} FROM feeds WHERE url = ?", FEED_COLUMNS);
        let feed = sqlx::query_as::<_, Feed>(&query)
            .bind(url)
            .fetch_optional(self.pool)
            .await?;

        Ok(feed)
    }

    /// List all feeds (oldest first).
    pub async fn list_all(&self) -> Result<Vec<Feed>> {
        let query = format!(
            "SELECT {} FROM feeds ORDER BY created_at ASC, id ASC",
            FEED_COLUMNS
        );
        let feeds = sqlx::query_as::<_, Feed>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(feeds)
    }

    /// Count all feeds.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM feeds")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// List up to `limit` feeds in fetch order.
    ///
    /// Never-fetched feeds come first, then the least recently fetched.
    pub async fn next_to_fetch(&self, limit: u32) -> Result<Vec<Feed>> {
        let query = format!(
            "SELECT {} FROM feeds
             ORDER BY last_fetched_at ASC NULLS FIRST, created_at ASC, id ASC
             LIMIT ?",
            FEED_COLUMNS
        );
        let feeds = sqlx::query_as::<_, Feed>(&query)
            .bind(i64::from(limit))
            .fetch_all(self.pool)
            .await?;

        Ok(feeds)
    }

    /// Record that the feed was claimed for fetching at `at`.
    ///
    /// `last_fetched_at` only moves forward: an older timestamp leaves the
    /// row untouched and the call returns `false`.
    pub async fn mark_fetched(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE feeds
             SET last_fetched_at = ?, updated_at = ?
             WHERE id = ? AND (last_fetched_at IS NULL OR last_fetched_at < ?)",
        )
        .bind(at)
        .bind(at)
        .bind(id)
        .bind(at)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Repository for feed follow (subscription) operations.
pub struct FeedFollowRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> FeedFollowRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Subscribe `user_id` to `feed_id`.
    ///
    /// Repeated follows of the same feed by the same user create separate rows.
    pub async fn create(&self, feed_id: Uuid, user_id: Uuid) -> Result<FeedFollow> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO feed_follows (id, feed_id, user_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {}",
            FOLLOW_COLUMNS
        );
        let follow = sqlx::query_as::<_, FeedFollow>(&query)
            .bind(Uuid::new_v4())
            .bind(feed_id)
            .bind(user_id)
            .bind(now)
            .bind(now)
            .fetch_one(self.pool)
            .await?;

        Ok(follow)
    }

    /// List a user's follows (oldest first).
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<FeedFollow>> {
        let query = format!(
            "SELECT {} FROM feed_follows WHERE user_id = ? ORDER BY created_at ASC, id ASC",
            FOLLOW_COLUMNS
        );
        let follows = sqlx::query_as::<_, FeedFollow>(&query)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        Ok(follows)
    }

    /// Count follows of a feed.
    pub async fn count_by_feed(&self, feed_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM feed_follows WHERE feed_id = ?")
            .bind(feed_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Delete a follow. Returns `false` if it did not exist.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM feed_follows WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Repository for post operations.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Store a post. No deduplication is performed.
    pub async fn create(&self, post: &NewPost) -> Result<Post> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO posts (id, feed_id, title, url, description, published_at, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {}",
            POST_COLUMNS
        );
        let created = sqlx::query_as::<_, Post>(&query)
            .bind(Uuid::new_v4())
            .bind(post.feed_id)
            .bind(&post.title)
            .bind(&post.url)
            .bind(&post.description)
            .bind(post.published_at)
            .bind(now)
            .bind(now)
            .fetch_one(self.pool)
            .await?;

        Ok(created)
    }

    /// List posts of a feed (newest first).
    pub async fn list_by_feed(&self, feed_id: Uuid) -> Result<Vec<Post>> {
        let query = format!(
            "SELECT {} FROM posts WHERE feed_id = ?
             ORDER BY published_at DESC NULLS LAST, created_at DESC",
            POST_COLUMNS
        );
        let posts = sqlx::query_as::<_, Post>(&query)
            .bind(feed_id)
            .fetch_all(self.pool)
            .await?;

        Ok(posts)
    }

    /// Count posts of a feed.
    pub async fn count_by_feed(&self, feed_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE feed_id = ?")
            .bind(feed_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// List up to `limit` posts from the feeds a user follows (newest first).
    pub async fn list_for_user(&self, user_id: Uuid, limit: u32) -> Result<Vec<Post>> {
        let query = format!(
            "SELECT {} FROM posts
             WHERE feed_id IN (SELECT feed_id FROM feed_follows WHERE user_id = ?)
             ORDER BY published_at DESC NULLS LAST, created_at DESC
             LIMIT ?",
            POST_COLUMNS
        );
        let posts = sqlx::query_as::<_, Post>(&query)
            .bind(user_id)
            .bind(i64::from(limit))
            .fetch_all(self.pool)
            .await?;

        Ok(posts)
    }
}
