//! Response DTOs for Web API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::User;
use crate::feed::{CreateFeedOutcome, Feed, FeedFollow, Post};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Readiness probe response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    /// Always "ok".
    pub status: &'static str,
}

/// User in responses. Includes the API key.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub api_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            api_key: user.api_key,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Feed in responses.
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl From<Feed> for FeedResponse {
    fn from(feed: Feed) -> Self {
        Self {
            id: feed.id,
            name: feed.name,
            url: feed.url,
            user_id: feed.user_id,
            created_at: feed.created_at,
            updated_at: feed.updated_at,
            last_fetched_at: feed.last_fetched_at,
        }
    }
}

/// Feed follow in responses.
#[derive(Debug, Serialize)]
pub struct FeedFollowResponse {
    pub id: Uuid,
    pub feed_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FeedFollow> for FeedFollowResponse {
    fn from(follow: FeedFollow) -> Self {
        Self {
            id: follow.id,
            feed_id: follow.feed_id,
            user_id: follow.user_id,
            created_at: follow.created_at,
            updated_at: follow.updated_at,
        }
    }
}

/// Feed creation response.
///
/// `feed` is absent when the URL already had a feed and only a follow was
/// created.
#[derive(Debug, Serialize)]
pub struct CreateFeedResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed: Option<FeedResponse>,
    pub feed_follow: FeedFollowResponse,
}

impl From<CreateFeedOutcome> for CreateFeedResponse {
    fn from(outcome: CreateFeedOutcome) -> Self {
        match outcome {
            CreateFeedOutcome::Created { feed, follow } => Self {
                feed: Some(feed.into()),
                feed_follow: follow.into(),
            },
            CreateFeedOutcome::Attached { follow } => Self {
                feed: None,
                feed_follow: follow.into(),
            },
        }
    }
}

/// Post in responses.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub feed_id: Uuid,
    pub title: String,
    pub url: String,
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            feed_id: post.feed_id,
            title: post.title,
            url: post.url,
            description: post.description,
            published_at: post.published_at,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn follow() -> FeedFollow {
        let now = Utc::now();
        FeedFollow {
            id: Uuid::new_v4(),
            feed_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_attached_response_omits_feed() {
        let response = CreateFeedResponse::from(CreateFeedOutcome::Attached { follow: follow() });
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("feed").is_none());
        assert!(json.get("feed_follow").is_some());
    }

    #[test]
    fn test_created_response_has_both() {
        let follow = follow();
        let now = Utc::now();
        let feed = Feed {
            id: follow.feed_id,
            name: "Blog".to_string(),
            url: "https://x.test/feed.xml".to_string(),
            user_id: follow.user_id,
            created_at: now,
            updated_at: now,
            last_fetched_at: None,
        };

        let response = CreateFeedResponse::from(CreateFeedOutcome::Created { feed, follow });
        let json = serde_json::to_value(ApiResponse::new(response)).unwrap();
        assert_eq!(json["data"]["feed"]["url"], "https://x.test/feed.xml");
        assert_eq!(json["data"]["feed"]["last_fetched_at"], serde_json::Value::Null);
        assert_eq!(json["data"]["feed"]["id"], json["data"]["feed_follow"]["feed_id"]);
    }
}
