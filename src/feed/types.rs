//! Feed types for Gazette.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A feed: a named, URL-unique external content source.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Feed {
    /// Feed ID.
    pub id: Uuid,
    /// Display name given by the creator.
    pub name: String,
    /// Source URL (globally unique).
    pub url: String,
    /// User who created the feed.
    pub user_id: Uuid,
    /// When the feed was created.
    pub created_at: DateTime<Utc>,
    /// When the feed was last updated.
    pub updated_at: DateTime<Utc>,
    /// When the scheduler last claimed the feed. `None` until the first claim.
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl Feed {
    /// Check whether the scheduler has ever claimed this feed.
    pub fn has_been_fetched(&self) -> bool {
        self.last_fetched_at.is_some()
    }
}

/// New feed for creation.
#[derive(Debug, Clone)]
pub struct NewFeed {
    /// Display name.
    pub name: String,
    /// Source URL.
    pub url: String,
    /// Owner.
    pub user_id: Uuid,
}

impl NewFeed {
    /// Create a new feed.
    pub fn new(name: impl Into<String>, url: impl Into<String>, user_id: Uuid) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            user_id,
        }
    }
}

/// A user's subscription to a feed ("feed follow").
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct FeedFollow {
    /// Subscription ID.
    pub id: Uuid,
    /// Followed feed.
    pub feed_id: Uuid,
    /// Following user.
    pub user_id: Uuid,
    /// When the subscription was created.
    pub created_at: DateTime<Utc>,
    /// When the subscription was last updated.
    pub updated_at: DateTime<Utc>,
}

/// An item ingested from a feed.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Post {
    /// Post ID.
    pub id: Uuid,
    /// Feed that produced the item.
    pub feed_id: Uuid,
    /// Item title.
    pub title: String,
    /// Link to the original article.
    pub url: String,
    /// Item description (HTML tags stripped).
    pub description: String,
    /// When the item was published, if the source says.
    pub published_at: Option<DateTime<Utc>>,
    /// When the post was stored.
    pub created_at: DateTime<Utc>,
    /// When the post was last updated.
    pub updated_at: DateTime<Utc>,
}

/// New post for creation.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Feed ID.
    pub feed_id: Uuid,
    /// Item title.
    pub title: String,
    /// Link to the original article.
    pub url: String,
    /// Item description.
    pub description: String,
    /// When the item was published.
    pub published_at: Option<DateTime<Utc>>,
}

impl NewPost {
    /// Build a post for `feed_id` out of a parsed item.
    pub fn from_item(feed_id: Uuid, item: ParsedItem) -> Self {
        Self {
            feed_id,
            title: item.title,
            url: item.link.unwrap_or_default(),
            description: item.description.unwrap_or_default(),
            published_at: item.published_at,
        }
    }
}

/// Parsed item data from an external source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedItem {
    /// Item title (empty when the source has none).
    pub title: String,
    /// Link to the original article.
    pub link: Option<String>,
    /// Item description (HTML tags stripped).
    pub description: Option<String>,
    /// When the item was published.
    pub published_at: Option<DateTime<Utc>>,
}

impl ParsedItem {
    /// Create a new item with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the published date.
    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_feed() {
        let owner = Uuid::new_v4();
        let feed = NewFeed::new("Blog", "https://x.test/feed.xml", owner);
        assert_eq!(feed.name, "Blog");
        assert_eq!(feed.url, "https://x.test/feed.xml");
        assert_eq!(feed.user_id, owner);
    }

    #[test]
    fn test_parsed_item_builder() {
        let now = Utc::now();
        let item = ParsedItem::new("Hello")
            .with_link("https://x.test/hello")
            .with_description("First post")
            .with_published_at(now);
        assert_eq!(item.title, "Hello");
        assert_eq!(item.link.as_deref(), Some("https://x.test/hello"));
        assert_eq!(item.description.as_deref(), Some("First post"));
        assert_eq!(item.published_at, Some(now));
    }

    #[test]
    fn test_new_post_from_item_fills_missing_fields() {
        let feed_id = Uuid::new_v4();
        let post = NewPost::from_item(feed_id, ParsedItem::new("Bare"));
        assert_eq!(post.feed_id, feed_id);
        assert_eq!(post.title, "Bare");
        assert_eq!(post.url, "");
        assert_eq!(post.description, "");
        assert!(post.published_at.is_none());
    }

    #[test]
    fn test_feed_has_been_fetched() {
        let now = Utc::now();
        let feed = Feed {
            id: Uuid::new_v4(),
            name: "Blog".to_string(),
            url: "https://x.test/feed.xml".to_string(),
            user_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            last_fetched_at: None,
        };
        assert!(!feed.has_been_fetched());

        let fetched = Feed {
            last_fetched_at: Some(now),
            ..feed
        };
        assert!(fetched.has_been_fetched());
    }
}
