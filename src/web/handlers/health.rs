//! Health and probe handlers.

use axum::Json;

use crate::web::dto::{ApiResponse, ReadinessResponse};
use crate::web::error::ApiError;

/// GET /v1/readiness - Report that the service is up.
pub async fn readiness() -> Json<ApiResponse<ReadinessResponse>> {
    Json(ApiResponse::new(ReadinessResponse { status: "ok" }))
}

/// GET /v1/err - Always answer with an internal error.
pub async fn error_probe() -> ApiError {
    ApiError::internal("Internal Server Error")
}

/// GET /health - Plain-text liveness check.
pub async fn health_check() -> &'static str {
    "OK"
}
