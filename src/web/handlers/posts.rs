//! Post handlers for Web API.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::feed::SubscriptionService;
use crate::web::dto::{ApiResponse, PostResponse, PostsQuery, QueryParams};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// GET /v1/posts?limit=N - Recent posts from the caller's followed feeds.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    QueryParams(query): QueryParams<PostsQuery>,
) -> Result<Json<ApiResponse<Vec<PostResponse>>>, ApiError> {
    let service = SubscriptionService::new(&state.db);
    let posts = service.list_posts_for_user(&user, query.limit).await?;
    Ok(Json(ApiResponse::new(
        posts.into_iter().map(PostResponse::from).collect(),
    )))
}
