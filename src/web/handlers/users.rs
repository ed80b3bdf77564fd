//! User handlers for Web API.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::auth::register;
use crate::web::dto::{ApiResponse, CreateUserRequest, JsonBody, UserResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /v1/users - Register a user and issue an API key.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = register(&state.db, &req.name).await?;
    Ok(Json(ApiResponse::new(user.into())))
}

/// GET /v1/users - Get the authenticated user.
pub async fn get_user(AuthUser(user): AuthUser) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::new(user.into()))
}
