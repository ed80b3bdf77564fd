//! Feed follow handlers for Web API.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::feed::SubscriptionService;
use crate::web::dto::{ApiResponse, CreateFeedFollowRequest, FeedFollowResponse, JsonBody};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

fn parse_id(raw: &str, field: &str) -> Result<Uuid, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::validation(format!("{} cannot be empty", field)));
    }
    Uuid::parse_str(raw).map_err(|_| ApiError::validation(format!("{} is not a valid id", field)))
}

/// POST /v1/feed_follows - Follow an existing feed.
pub async fn create_feed_follow(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<CreateFeedFollowRequest>,
) -> Result<Json<ApiResponse<FeedFollowResponse>>, ApiError> {
    let feed_id = parse_id(&req.feed_id, "feed_id")?;
    let service = SubscriptionService::new(&state.db);
    let follow = service.follow_feed(&user, feed_id).await?;
    Ok(Json(ApiResponse::new(follow.into())))
}

/// GET /v1/feed_follows - List the caller's follows.
pub async fn list_feed_follows(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<Vec<FeedFollowResponse>>>, ApiError> {
    let service = SubscriptionService::new(&state.db);
    let follows = service.list_follows(&user).await?;
    Ok(Json(ApiResponse::new(
        follows.into_iter().map(FeedFollowResponse::from).collect(),
    )))
}

/// DELETE /v1/feed_follows/:id - Delete a follow.
pub async fn delete_feed_follow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = parse_id(&id, "feed follow id")?;
    let service = SubscriptionService::new(&state.db);
    service.unfollow(id).await?;
    Ok(Json(ApiResponse::new(())))
}
