//! Feed handlers for Web API.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::feed::SubscriptionService;
use crate::web::dto::{ApiResponse, CreateFeedRequest, CreateFeedResponse, FeedResponse, JsonBody};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /v1/feeds - Create a feed, or follow the existing feed for the URL.
pub async fn create_feed(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<CreateFeedRequest>,
) -> Result<Json<ApiResponse<CreateFeedResponse>>, ApiError> {
    let service = SubscriptionService::new(&state.db);
    let outcome = service.create_feed(&user, &req.name, &req.url).await?;
    Ok(Json(ApiResponse::new(outcome.into())))
}

/// GET /v1/feeds - List all feeds.
pub async fn list_feeds(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<FeedResponse>>>, ApiError> {
    let service = SubscriptionService::new(&state.db);
    let feeds = service.list_feeds().await?;
    Ok(Json(ApiResponse::new(
        feeds.into_iter().map(FeedResponse::from).collect(),
    )))
}
