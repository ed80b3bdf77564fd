//! Test helpers for Web API tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use gazette::web::{create_health_router, create_router, AppState};
use gazette::Database;
use serde_json::{json, Value};

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Arc<Database>) {
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );
    let app_state = Arc::new(AppState::new(Arc::clone(&db)));
    let router = create_router(app_state, &[]).merge(create_health_router());
    let server = TestServer::new(router).expect("Failed to create test server");
    (server, db)
}

/// Register a user through the API and return its API key.
pub async fn register_user(server: &TestServer, name: &str) -> String {
    let response = server.post("/v1/users").json(&json!({ "name": name })).await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["data"]["api_key"].as_str().unwrap().to_string()
}

/// Authorization header value for an API key.
pub fn api_key_header(api_key: &str) -> String {
    format!("ApiKey {}", api_key)
}

/// Create a feed through the API and return the response body.
pub async fn create_feed(server: &TestServer, api_key: &str, name: &str, url: &str) -> Value {
    let response = server
        .post("/v1/feeds")
        .add_header(AUTHORIZATION, api_key_header(api_key))
        .json(&json!({ "name": name, "url": url }))
        .await;
    response.assert_status_ok();
    response.json()
}
