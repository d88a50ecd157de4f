//! Router fixtures: app state against a mock upstream, request helpers.

use newsgate::routes::router;
use newsgate::state::AppState;

use news_core::orchestrator::OrchestratorSettings;
use news_core::{
    BackendGateway, BearerSessionResolver, InMemoryKeywordRepository, KeywordRepository,
    LocalSearchFallbackEngine, NewsOrchestrator,
};

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_TOKEN: &str = "router-token-abc";
pub const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:9";

pub fn state_with_keywords(
    backend_url: &str,
    use_backend_search: bool,
    keywords: Arc<dyn KeywordRepository>,
) -> AppState {
    let gateway =
        BackendGateway::new(backend_url, Duration::from_secs(5)).expect("valid backend url");
    let orchestrator = NewsOrchestrator::new(
        gateway,
        Arc::new(BearerSessionResolver::default()),
        LocalSearchFallbackEngine::bundled(),
        OrchestratorSettings {
            use_backend_search,
            latest_limit: 20,
        },
    );
    AppState::new(orchestrator, keywords)
}

pub fn app(backend_url: &str, use_backend_search: bool) -> Router {
    router(state_with_keywords(
        backend_url,
        use_backend_search,
        Arc::new(InMemoryKeywordRepository::new()),
    ))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

/// Send one request through a fresh clone of the router.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("router is infallible")
}

pub async fn json_body(response: Response<Body>) -> (StatusCode, String, Value) {
    let status = response.status();
    let cache_control = response
        .headers()
        .get("cache-control")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    let json = serde_json::from_slice(&bytes).expect("json body");
    (status, cache_control, json)
}

pub fn news_ids(body: &Value) -> Vec<String> {
    body["data"]["news"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// All `Vary` values of a response, lowercased and split on commas.
pub fn vary_values<B>(response: &Response<B>) -> Vec<String> {
    response
        .headers()
        .get_all("vary")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|v| v.trim().to_ascii_lowercase())
        .collect()
}
