//! Request DTOs for Web API.
//!
//! Missing string fields deserialize as empty so that the service layer
//! reports them as validation errors.

use serde::Deserialize;

/// User registration request.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// Feed creation request.
#[derive(Debug, Deserialize)]
pub struct CreateFeedRequest {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Feed URL.
    #[serde(default)]
    pub url: String,
}

/// Feed follow request.
#[derive(Debug, Deserialize)]
pub struct CreateFeedFollowRequest {
    /// Feed to follow (UUID string).
    #[serde(default)]
    pub feed_id: String,
}

/// Query parameters for listing posts.
#[derive(Debug, Default, Deserialize)]
pub struct PostsQuery {
    /// Maximum number of posts.
    pub limit: Option<u32>,
}
