//! Shared fixtures for gateway and orchestrator integration tests.

use news_core::orchestrator::OrchestratorSettings;
use news_core::{
    BackendGateway, BearerSessionResolver, LocalSearchFallbackEngine, NewsOrchestrator,
};

use std::sync::Arc;
use std::time::Duration;

use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};
use serde_json::{Value, json};

pub const TEST_TOKEN: &str = "test-token-12345";
pub const TEST_LATEST_LIMIT: u32 = 20;

/// Port 9 (discard) on loopback: connections are refused immediately.
pub const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:9";

pub fn orchestrator(backend_url: &str, use_backend_search: bool) -> NewsOrchestrator {
    orchestrator_with_timeout(backend_url, use_backend_search, Duration::from_secs(5))
}

pub fn orchestrator_with_timeout(
    backend_url: &str,
    use_backend_search: bool,
    timeout: Duration,
) -> NewsOrchestrator {
    let gateway = BackendGateway::new(backend_url, timeout).expect("valid backend url");
    NewsOrchestrator::new(
        gateway,
        Arc::new(BearerSessionResolver::default()),
        LocalSearchFallbackEngine::bundled(),
        OrchestratorSettings {
            use_backend_search,
            latest_limit: TEST_LATEST_LIMIT,
        },
    )
}

pub fn authed_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {TEST_TOKEN}")).expect("valid header"),
    );
    headers
}

pub fn upstream_item(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "excerpt": "Upstream excerpt",
        "category": "tech",
        "image_url": "https://cdn.example.com/img.jpg",
        "published_at": "2025-03-01T10:00:00Z",
        "source": "Upstream Daily"
    })
}

pub fn search_body(keywords: Value) -> Vec<u8> {
    serde_json::to_vec(&json!({ "keywords": keywords })).expect("serializable body")
}
