use crate::helpers::{
    UNREACHABLE_BACKEND, app, delete, get, json_body, news_ids, post_json, send,
    state_with_keywords,
};

use newsgate::routes::router;

use news_core::KeywordRepository;
use news_core::error::KeywordStoreError;

use models::KeywordSubscription;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use uuid::Uuid;

/// Repository that panics on every call, to exercise the panic layer.
struct PanickingRepository;

#[async_trait]
impl KeywordRepository for PanickingRepository {
    async fn list(&self) -> Result<Vec<KeywordSubscription>, KeywordStoreError> {
        panic!("keyword store exploded")
    }

    async fn add(&self, _keyword: &str) -> Result<KeywordSubscription, KeywordStoreError> {
        panic!("keyword store exploded")
    }

    async fn remove(&self, _id: Uuid) -> Result<KeywordSubscription, KeywordStoreError> {
        panic!("keyword store exploded")
    }
}

/// **VALUE**: Verifies the keyword subscription lifecycle over HTTP.
///
/// **WHY THIS MATTERS**: Subscriptions drive what users search for; add, list and
/// remove must agree on ids.
///
/// **BUG THIS CATCHES**: Would catch DELETE parsing the id from the wrong path segment
/// or POST forgetting the 201 status.
#[tokio::test]
async fn given_keyword_added_when_listing_and_deleting_then_lifecycle_is_consistent() {
    // GIVEN: Empty store
    let app = app(UNREACHABLE_BACKEND, false);

    // WHEN: Adding a keyword
    let (status, cache_control, created) =
        json_body(send(&app, post_json("/keywords", r#"{"keyword": "  반도체 "}"#)).await).await;

    // THEN: 201 with trimmed keyword and an id
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(cache_control, "no-store");
    assert_eq!(created["data"]["keyword"], "반도체");
    let id = created["data"]["id"].as_str().unwrap().to_string();
    assert!(created["data"]["createdAt"].is_string());

    // AND: Listing shows it
    let (_, _, listed) = json_body(send(&app, get("/keywords")).await).await;
    assert_eq!(listed["data"]["keywords"][0]["id"], id.as_str());

    // WHEN: Deleting it
    let (status, _, removed) =
        json_body(send(&app, delete(&format!("/keywords/{id}"))).await).await;

    // THEN: 200 and the list is empty again
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["data"]["id"], id.as_str());
    let (_, _, listed) = json_body(send(&app, get("/keywords")).await).await;
    assert_eq!(listed["data"]["keywords"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn given_duplicate_keyword_when_adding_then_conflict() {
    let app = app(UNREACHABLE_BACKEND, false);
    send(&app, post_json("/keywords", r#"{"keyword": "Economy"}"#)).await;

    let (status, _, body) =
        json_body(send(&app, post_json("/keywords", r#"{"keyword": "economy"}"#)).await).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn given_invalid_keyword_bodies_when_adding_then_bad_request() {
    let app = app(UNREACHABLE_BACKEND, false);
    let too_long = format!(r#"{{"keyword": "{}"}}"#, "x".repeat(51));

    for raw in [r#"{"keyword": "   "}"#, "not json", too_long.as_str()] {
        let (status, _, body) = json_body(send(&app, post_json("/keywords", raw)).await).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {raw}");
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn given_unknown_or_invalid_id_when_deleting_then_404_or_400() {
    let app = app(UNREACHABLE_BACKEND, false);

    let unknown = send(&app, delete(&format!("/keywords/{}", Uuid::new_v4()))).await;
    let invalid = send(&app, delete("/keywords/not-a-uuid")).await;

    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

/// **VALUE**: Verifies a panicking handler still answers with the fault envelope.
///
/// **WHY THIS MATTERS**: A panic would otherwise drop the connection and the page
/// would render nothing. The fault body still carries the static corpus.
///
/// **BUG THIS CATCHES**: Would catch removal of the catch-panic layer.
#[tokio::test]
async fn given_panicking_handler_when_requested_then_500_with_fallback_corpus() {
    // GIVEN: Router whose keyword store panics
    let state = state_with_keywords(UNREACHABLE_BACKEND, false, Arc::new(PanickingRepository));
    let app = router(state);

    // WHEN: Hitting a route backed by the store
    let (status, cache_control, body) = json_body(send(&app, get("/keywords")).await).await;

    // THEN: 500 fault envelope with fallback news
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(cache_control, "no-store");
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
    assert!(!news_ids(&body).is_empty());
}
