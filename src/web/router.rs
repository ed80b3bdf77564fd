//! Router configuration for Web API.

use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_feed, create_feed_follow, create_user, delete_feed_follow, error_probe, get_user,
    health_check, list_feed_follows, list_feeds, list_posts, readiness, AppState,
};
use super::middleware::create_cors_layer;

/// Create the main API router with every route under `/v1`.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let v1_routes = Router::new()
        .route("/readiness", get(readiness))
        .route("/err", get(error_probe))
        .route("/users", get(get_user).post(create_user))
        .route("/feeds", get(list_feeds).post(create_feed))
        .route(
            "/feed_follows",
            get(list_feed_follows).post(create_feed_follow),
        )
        .route("/feed_follows/:id", delete(delete_feed_follow))
        .route("/posts", get(list_posts));

    Router::new()
        .nest("/v1", v1_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn app() -> Router {
        let db = Arc::new(Database::open_in_memory().await.unwrap());
        create_router(Arc::new(AppState::new(db)), &[]).merge(create_health_router())
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = app()
            .await
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_routes_live_under_v1() {
        let response = app()
            .await
            .oneshot(Request::get("/v1/readiness").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app()
            .await
            .oneshot(Request::get("/readiness").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
