use crate::helpers::{TEST_TOKEN, UNREACHABLE_BACKEND, upstream_item};

use news_core::BackendGateway;
use news_core::error::GatewayError;

use common::HttpStatusCode;
use models::{IdentityState, SearchQuery};

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the personalized call forwards the bearer token and returns the raw payload.
///
/// **WHY THIS MATTERS**: The personalized payload is passed through untouched; any
/// rewriting here would change what logged-in users see.
///
/// **BUG THIS CATCHES**: Would catch a missing Authorization header or payload rewriting.
#[tokio::test]
async fn given_authenticated_identity_when_fetching_personalized_then_sends_bearer_and_returns_payload() {
    // GIVEN: Upstream expecting the bearer token
    let server = MockServer::start().await;
    let payload = json!({"success": true, "data": {"news": [upstream_item("p1", "Mine")], "message": "for you"}});
    Mock::given(method("GET"))
        .and(path("/api/news/personalized"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = BackendGateway::new(&server.uri(), Duration::from_secs(5)).unwrap();

    // WHEN: Fetching
    let result = gateway
        .fetch_personalized(&IdentityState::from_token(Some(TEST_TOKEN)))
        .await
        .unwrap();

    // THEN: Payload returned verbatim
    assert_eq!(result, payload);
}

#[tokio::test]
async fn given_latest_endpoint_when_fetching_then_sends_limit_and_decodes_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news/latest"))
        .and(query_param("limit", "7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([upstream_item("l1", "First"), upstream_item("l2", "Second")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = BackendGateway::new(&server.uri(), Duration::from_secs(5)).unwrap();

    let items = gateway.fetch_latest(7).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[1].title, "Second");
    assert_eq!(items[0].image_url, "https://cdn.example.com/img.jpg");
}

#[tokio::test]
async fn given_search_when_calling_upstream_then_posts_keywords() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/news/search"))
        .and(body_json(json!({"keywords": ["AI", "반도체"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = BackendGateway::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let query = SearchQuery::new(vec![String::from("AI"), String::from("반도체")]).unwrap();

    let result = gateway.search(&query, &IdentityState::anonymous()).await.unwrap();

    assert_eq!(result, json!({"success": true}));

    let requests = server.received_requests().await.unwrap();
    let auth = requests[0]
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(auth.starts_with("Bearer"), "anonymous search still sends a bearer header");
}

/// **VALUE**: Verifies non-2xx statuses become `Status` errors, not payloads.
///
/// **WHY THIS MATTERS**: An upstream 503 with a JSON error body must trigger fallback;
/// passing it through would render the error object as a feed.
///
/// **BUG THIS CATCHES**: Would catch removal of the status check.
#[tokio::test]
async fn given_upstream_error_status_when_calling_then_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news/latest"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "maintenance"})))
        .mount(&server)
        .await;

    let gateway = BackendGateway::new(&server.uri(), Duration::from_secs(5)).unwrap();

    let err = gateway.fetch_latest(5).await.unwrap_err();

    match &err {
        GatewayError::Status { status, message, .. } => {
            assert_eq!(*status, HttpStatusCode(503));
            assert!(message.contains("maintenance"));
        }
        other => panic!("expected Status, got {other}"),
    }
    assert!(err.is_upstream_unavailable());
}

/// **VALUE**: Verifies the timeout race cancels slow upstream calls.
///
/// **WHY THIS MATTERS**: The page waits on this call. Without the race, a hung backend
/// would hang every request instead of serving fallback content.
///
/// **BUG THIS CATCHES**: Would catch removal of `tokio::time::timeout` around the exchange.
#[tokio::test]
async fn given_slow_upstream_when_calling_then_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news/latest"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let gateway = BackendGateway::new(&server.uri(), Duration::from_millis(100)).unwrap();

    let started = std::time::Instant::now();
    let err = gateway.fetch_latest(5).await.unwrap_err();

    assert!(matches!(err, GatewayError::Timeout { .. }));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn given_non_json_body_when_calling_then_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news/personalized"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let gateway = BackendGateway::new(&server.uri(), Duration::from_secs(5)).unwrap();

    let err = gateway
        .fetch_personalized(&IdentityState::from_token(Some(TEST_TOKEN)))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::MalformedBody { .. }));
}

#[tokio::test]
async fn given_unreachable_backend_when_calling_then_network_error() {
    let gateway = BackendGateway::new(UNREACHABLE_BACKEND, Duration::from_secs(5)).unwrap();

    let err = gateway.fetch_latest(5).await.unwrap_err();

    assert!(
        matches!(err, GatewayError::Network { .. } | GatewayError::Timeout { .. }),
        "got {err}"
    );
    assert!(err.is_upstream_unavailable());
}
