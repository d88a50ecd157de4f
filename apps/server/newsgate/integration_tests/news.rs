use crate::helpers::{
    TEST_TOKEN, UNREACHABLE_BACKEND, app, get, json_body, news_ids, post_json, send,
    vary_values,
};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the router writes the anonymous outcome with its cache header.
///
/// **WHY THIS MATTERS**: The CDN decides what to share from `Cache-Control`. If the
/// header is lost between orchestrator and wire, anonymous pages stop being cached.
///
/// **BUG THIS CATCHES**: Would catch the handler returning the body without the header,
/// or without `Vary: Authorization, Cookie`, which lets a shared cache hand the
/// anonymous feed to a logged-in user.
#[tokio::test]
async fn given_anonymous_get_when_backend_healthy_then_public_cache_and_envelope() {
    // GIVEN: Upstream latest feed
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "n1",
            "title": "Headline",
            "imageURL": "/img/n1.jpg",
            "published_at": "2025-03-01T10:00:00Z"
        }])))
        .mount(&server)
        .await;

    let app = app(&server.uri(), true);

    // WHEN: GET without credentials from a browser origin
    let request = Request::builder()
        .method("GET")
        .uri("/personalized-news")
        .header("origin", "https://news.example.com")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    // THEN: Shared caches must key on identity headers, CORS vary kept
    let vary = vary_values(&response);
    assert!(vary.contains(&String::from("authorization")), "vary {vary:?}");
    assert!(vary.contains(&String::from("cookie")), "vary {vary:?}");
    assert!(vary.contains(&String::from("origin")), "vary {vary:?}");

    // AND: 200, public cache, canonical field names
    let (status, cache_control, body) = json_body(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        cache_control,
        "public, s-maxage=300, stale-while-revalidate=600"
    );
    assert_eq!(body["success"], true);
    assert_eq!(news_ids(&body), vec!["n1"]);
    assert_eq!(body["data"]["news"][0]["imageUrl"], "/img/n1.jpg");
    assert_eq!(body["data"]["news"][0]["publishedAt"], "2025-03-01T10:00:00Z");
}

/// **VALUE**: Verifies upstream items with null optional fields reach the caller.
///
/// **WHY THIS MATTERS**: Degrading a healthy feed because of one `null` image hides
/// fresh news behind the static corpus for every anonymous visitor.
///
/// **BUG THIS CATCHES**: Would catch null optional fields failing the whole list decode.
#[tokio::test]
async fn given_upstream_item_with_null_fields_when_getting_anonymously_then_served_not_degraded() {
    // GIVEN: Upstream item with null optional fields
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "u1",
            "title": "Upstream",
            "excerpt": null,
            "image_url": null,
            "published_at": "2025-03-01T10:00:00Z",
            "source": null
        }])))
        .mount(&server)
        .await;

    let app = app(&server.uri(), true);

    // WHEN: Anonymous GET
    let (status, cache_control, body) =
        json_body(send(&app, get("/personalized-news")).await).await;

    // THEN: Upstream item served with the anonymous success policy
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        cache_control,
        "public, s-maxage=300, stale-while-revalidate=600"
    );
    assert_eq!(news_ids(&body), vec!["u1"]);
    assert_eq!(body["data"]["news"][0]["imageUrl"], "");
}

#[tokio::test]
async fn given_session_cookie_when_getting_then_personalized_payload_with_private_cache() {
    let server = MockServer::start().await;
    let payload = json!({"success": true, "data": {"news": [], "message": "curated"}});
    Mock::given(method("GET"))
        .and(path("/api/news/personalized"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(&server.uri(), true);
    let request = Request::builder()
        .method("GET")
        .uri("/personalized-news")
        .header("cookie", format!("theme=dark; session_token={TEST_TOKEN}"))
        .body(Body::empty())
        .unwrap();

    let (status, cache_control, body) = json_body(send(&app, request).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache_control, "private, max-age=60");
    assert_eq!(body, payload);
}

#[tokio::test]
async fn given_backend_down_when_getting_then_fallback_feed_with_short_cache() {
    let app = app(UNREACHABLE_BACKEND, true);

    let (status, cache_control, body) = json_body(send(&app, get("/personalized-news")).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache_control, "public, s-maxage=60, stale-while-revalidate=120");
    assert_eq!(body["success"], true);
    assert!(!news_ids(&body).is_empty());
}

/// **VALUE**: Verifies malformed search bodies become a 400 failure envelope.
///
/// **WHY THIS MATTERS**: axum's own JSON rejection would answer in plain text; the
/// page expects the envelope on every code path.
///
/// **BUG THIS CATCHES**: Would catch the handler switching to the `Json` extractor.
#[tokio::test]
async fn given_malformed_search_body_when_posting_then_400_envelope_no_store() {
    let app = app(UNREACHABLE_BACKEND, false);

    for raw in ["{not json", r#"{"query": ["AI"]}"#, r#"{"keywords": []}"#] {
        let (status, cache_control, body) =
            json_body(send(&app, post_json("/personalized-news", raw)).await).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {raw}");
        assert_eq!(cache_control, "no-store");
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn given_keyword_search_with_backend_disabled_when_posting_then_local_results() {
    let app = app(UNREACHABLE_BACKEND, false);

    let (status, cache_control, body) = json_body(
        send(&app, post_json("/personalized-news", r#"{"keywords": ["ai"]}"#)).await,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        cache_control,
        "public, s-maxage=300, stale-while-revalidate=600"
    );
    assert_eq!(news_ids(&body), vec!["fallback-1", "fallback-2", "fallback-8"]);
    assert_eq!(body["data"]["keywords"], json!(["ai"]));
}

#[tokio::test]
async fn given_health_route_when_getting_then_ok() {
    let app = app(UNREACHABLE_BACKEND, false);

    let response = send(&app, get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_cors_preflight_when_sent_then_allows_post() {
    let app = app(UNREACHABLE_BACKEND, false);
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/personalized-news")
        .header("origin", "https://news.example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;

    assert!(response.status().is_success());
    let allowed = response
        .headers()
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(allowed.contains("POST"));
}
