// Unit tests for endpoint selection, URL building and payload decoding

use crate::error::GatewayError;
use crate::gateway::{BackendGateway, DEFAULT_UPSTREAM_TIMEOUT, Endpoint, decode_news_list};

use reqwest::Method;
use serde_json::json;

#[test]
fn given_endpoints_when_asking_method_then_only_search_posts() {
    assert_eq!(Endpoint::Search.method(), Method::POST);
    assert_eq!(Endpoint::Latest { limit: 1 }.method(), Method::GET);
    assert_eq!(Endpoint::Personalized.method(), Method::GET);
}

/// **VALUE**: Verifies base URLs with a path prefix keep it when endpoints are joined.
///
/// **BUG THIS CATCHES**: Would catch removal of the trailing-slash normalization, which
/// makes `Url::join` replace the last segment ("/v2" disappears).
#[test]
fn given_base_url_with_prefix_when_building_endpoint_url_then_prefix_kept() {
    let gateway = BackendGateway::new("http://backend:8000/v2", DEFAULT_UPSTREAM_TIMEOUT).unwrap();

    let personalized = gateway.endpoint_url(&Endpoint::Personalized).unwrap();
    let latest = gateway.endpoint_url(&Endpoint::Latest { limit: 5 }).unwrap();

    assert_eq!(personalized.as_str(), "http://backend:8000/v2/api/news/personalized");
    assert_eq!(latest.as_str(), "http://backend:8000/v2/api/news/latest?limit=5");
}

#[test]
fn given_invalid_base_url_when_creating_gateway_then_url_parse_error() {
    let result = BackendGateway::new("not a url", DEFAULT_UPSTREAM_TIMEOUT);

    match result {
        Err(e @ GatewayError::UrlParse { .. }) => assert!(!e.is_upstream_unavailable()),
        Err(other) => panic!("expected UrlParse, got {other}"),
        Ok(_) => panic!("expected UrlParse error"),
    }
}

#[test]
fn given_supported_payload_shapes_when_decoding_then_items_extracted() {
    let item = json!({"id": "n1", "title": "Headline", "publishedAt": "2025-01-01T00:00:00Z"});

    for payload in [
        json!([item.clone()]),
        json!({"news": [item.clone()]}),
        json!({"success": true, "data": {"news": [item.clone()]}}),
    ] {
        let items = decode_news_list(payload).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "n1");
    }
}

/// **VALUE**: Verifies unexpected shapes are classified as malformed upstream bodies.
///
/// **WHY THIS MATTERS**: Malformed upstream JSON must trigger fallback, not a 500.
///
/// **BUG THIS CATCHES**: Would catch if a missing list decodes as an empty feed, which
/// would show anonymous users a blank page with a success message.
#[test]
fn given_unsupported_payload_when_decoding_then_malformed_body() {
    for payload in [
        json!({"items": []}),
        json!("news"),
        json!({"data": {"news": "none"}}),
        json!([{"title": "no id or timestamp"}]),
    ] {
        let err = decode_news_list(payload).unwrap_err();
        assert!(matches!(err, GatewayError::MalformedBody { .. }));
        assert!(err.is_upstream_unavailable());
    }
}

/// **VALUE**: Verifies upstream items with `null` optional fields still decode.
///
/// **WHY THIS MATTERS**: One item with `"image_url": null` must not turn a healthy
/// anonymous feed into the degraded fallback feed.
///
/// **BUG THIS CATCHES**: Would catch optional text fields rejecting explicit nulls.
#[test]
fn given_null_optional_fields_when_decoding_then_items_kept() {
    let payload = json!([
        {
            "id": "u1",
            "title": "Upstream",
            "excerpt": null,
            "category": null,
            "image_url": null,
            "published_at": "2025-03-01T10:00:00Z",
            "source": null
        },
        {"id": "u2", "title": "Second", "imageURL": "/img/u2.jpg", "publishedAt": "2025-03-01T09:00:00Z"}
    ]);

    let items = decode_news_list(payload).unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].image_url, "");
    assert_eq!(items[0].excerpt, "");
    assert_eq!(items[1].image_url, "/img/u2.jpg");
}
