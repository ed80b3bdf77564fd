//! Web API tests for feeds, feed follows and posts.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use common::{api_key_header, create_feed, create_test_server, register_user};
use gazette::feed::{FeedRepository, NewPost, ParsedItem, PostRepository};
use serde_json::{json, Value};
use uuid::Uuid;

// ============================================================================
// Feeds
// ============================================================================

#[tokio::test]
async fn test_create_feed() {
    let (server, _db) = create_test_server().await;
    let api_key = register_user(&server, "Bob").await;

    let body = create_feed(&server, &api_key, "Blog", "https://x.test/feed.xml").await;

    let feed = &body["data"]["feed"];
    let follow = &body["data"]["feed_follow"];
    assert_eq!(feed["name"], "Blog");
    assert_eq!(feed["url"], "https://x.test/feed.xml");
    assert!(feed["last_fetched_at"].is_null());
    assert_eq!(follow["feed_id"], feed["id"]);
    assert_eq!(follow["user_id"], feed["user_id"]);
}

#[tokio::test]
async fn test_create_feed_requires_auth() {
    let (server, db) = create_test_server().await;

    let response = server
        .post("/v1/feeds")
        .json(&json!({ "name": "Blog", "url": "https://x.test/feed.xml" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let count = FeedRepository::new(db.pool()).count().await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_create_feed_missing_fields() {
    let (server, _db) = create_test_server().await;
    let api_key = register_user(&server, "Bob").await;

    for payload in [
        json!({ "url": "https://x.test/feed.xml" }),
        json!({ "name": "Blog" }),
        json!({ "name": " ", "url": "https://x.test/feed.xml" }),
    ] {
        let response = server
            .post("/v1/feeds")
            .add_header(AUTHORIZATION, api_key_header(&api_key))
            .json(&payload)
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_create_feed_duplicate_url_returns_follow_only() {
    let (server, db) = create_test_server().await;
    let bob = register_user(&server, "Bob").await;
    let alice = register_user(&server, "Alice").await;

    let first = create_feed(&server, &bob, "Blog", "https://x.test/feed.xml").await;
    let second = create_feed(&server, &alice, "Mine", "https://x.test/feed.xml").await;

    assert!(second["data"].get("feed").is_none());
    assert_eq!(
        second["data"]["feed_follow"]["feed_id"],
        first["data"]["feed"]["id"]
    );

    let count = FeedRepository::new(db.pool()).count().await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_list_feeds_is_public() {
    let (server, _db) = create_test_server().await;
    let api_key = register_user(&server, "Bob").await;
    create_feed(&server, &api_key, "A", "https://a.test/feed.xml").await;
    create_feed(&server, &api_key, "B", "https://b.test/feed.xml").await;

    let response = server.get("/v1/feeds").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let feeds = body["data"].as_array().unwrap();
    assert_eq!(feeds.len(), 2);
    assert_eq!(feeds[0]["name"], "A");
    assert_eq!(feeds[1]["name"], "B");
}

// ============================================================================
// Feed follows
// ============================================================================

#[tokio::test]
async fn test_follow_existing_feed() {
    let (server, _db) = create_test_server().await;
    let bob = register_user(&server, "Bob").await;
    let alice = register_user(&server, "Alice").await;

    let created = create_feed(&server, &bob, "Blog", "https://x.test/feed.xml").await;
    let feed_id = created["data"]["feed"]["id"].as_str().unwrap();

    let response = server
        .post("/v1/feed_follows")
        .add_header(AUTHORIZATION, api_key_header(&alice))
        .json(&json!({ "feed_id": feed_id }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["feed_id"], feed_id);

    let response = server
        .get("/v1/feed_follows")
        .add_header(AUTHORIZATION, api_key_header(&alice))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_follow_missing_feed() {
    let (server, _db) = create_test_server().await;
    let api_key = register_user(&server, "Bob").await;

    let response = server
        .post("/v1/feed_follows")
        .add_header(AUTHORIZATION, api_key_header(&api_key))
        .json(&json!({ "feed_id": Uuid::new_v4().to_string() }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_follow_invalid_feed_id() {
    let (server, _db) = create_test_server().await;
    let api_key = register_user(&server, "Bob").await;

    for feed_id in ["", "not-a-uuid"] {
        let response = server
            .post("/v1/feed_follows")
            .add_header(AUTHORIZATION, api_key_header(&api_key))
            .json(&json!({ "feed_id": feed_id }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_delete_feed_follow() {
    let (server, _db) = create_test_server().await;
    let api_key = register_user(&server, "Bob").await;

    let created = create_feed(&server, &api_key, "Blog", "https://x.test/feed.xml").await;
    let follow_id = created["data"]["feed_follow"]["id"].as_str().unwrap();

    let response = server
        .delete(&format!("/v1/feed_follows/{}", follow_id))
        .await;
    response.assert_status_ok();

    let response = server
        .get("/v1/feed_follows")
        .add_header(AUTHORIZATION, api_key_header(&api_key))
        .await;
    let body: Value = response.json();
    assert!(body["data"].as_array().unwrap().is_empty());

    // Deleting again reports the follow as missing
    let response = server
        .delete(&format!("/v1/feed_follows/{}", follow_id))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

// ============================================================================
// Posts
// ============================================================================

#[tokio::test]
async fn test_list_posts_from_followed_feeds() {
    let (server, db) = create_test_server().await;
    let bob = register_user(&server, "Bob").await;
    let alice = register_user(&server, "Alice").await;

    let bobs = create_feed(&server, &bob, "Bob's", "https://b.test/feed.xml").await;
    create_feed(&server, &alice, "Alice's", "https://a.test/feed.xml").await;

    let bobs_feed_id: Uuid = bobs["data"]["feed"]["id"].as_str().unwrap().parse().unwrap();
    let alices_feed = FeedRepository::new(db.pool())
        .get_by_url("https://a.test/feed.xml")
        .await
        .unwrap()
        .unwrap();

    let posts = PostRepository::new(db.pool());
    for i in 0..3 {
        posts
            .create(&NewPost::from_item(
                bobs_feed_id,
                ParsedItem::new(format!("Bob {}", i)),
            ))
            .await
            .unwrap();
    }
    posts
        .create(&NewPost::from_item(alices_feed.id, ParsedItem::new("Alice")))
        .await
        .unwrap();

    let response = server
        .get("/v1/posts")
        .add_header(AUTHORIZATION, api_key_header(&bob))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles.len(), 3);
    assert!(titles.iter().all(|t| t.starts_with("Bob")));

    let response = server
        .get("/v1/posts")
        .add_query_param("limit", 2)
        .add_header(AUTHORIZATION, api_key_header(&bob))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_posts_invalid_limit() {
    let (server, _db) = create_test_server().await;
    let api_key = register_user(&server, "Bob").await;

    let response = server
        .get("/v1/posts")
        .add_query_param("limit", "lots")
        .add_header(AUTHORIZATION, api_key_header(&api_key))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_list_posts_requires_auth() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/v1/posts").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
