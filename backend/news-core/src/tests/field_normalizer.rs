// Unit tests for upstream field normalization

use crate::field_normalizer::{normalize_json, normalize_key};
use serde_json::json;

/// **VALUE**: Verifies every alias maps to the key `NewsItem` deserializes.
///
/// **WHY THIS MATTERS**: If an alias is not rewritten, serde rejects the item and a
/// healthy upstream response is treated as malformed, forcing fallback content.
///
/// **BUG THIS CATCHES**: Would catch a typo in the alias table.
#[test]
fn given_aliased_keys_when_normalize_key_then_returns_canonical_names() {
    assert_eq!(normalize_key("image_url"), "imageUrl");
    assert_eq!(normalize_key("imageURL"), "imageUrl");
    assert_eq!(normalize_key("published_at"), "publishedAt");
    assert_eq!(normalize_key("news_id"), "id");
}

#[test]
fn given_unknown_key_when_normalize_key_then_returns_unchanged() {
    assert_eq!(normalize_key("title"), "title");
    assert_eq!(normalize_key("imageUrl"), "imageUrl");
    assert_eq!(normalize_key("some_other_field"), "some_other_field");
}

/// **VALUE**: Verifies recursion through arrays and nested objects.
///
/// **BUG THIS CATCHES**: Would catch if only the top-level object is rewritten.
#[test]
fn given_nested_payload_when_normalize_json_then_rewrites_all_levels() {
    let payload = json!({
        "data": {
            "news": [
                {"news_id": "1", "image_url": "/a.jpg", "published_at": "2025-01-01T00:00:00Z"}
            ]
        }
    });

    let normalized = normalize_json(payload);

    let item = &normalized["data"]["news"][0];
    assert_eq!(item["id"], json!("1"));
    assert_eq!(item["imageUrl"], json!("/a.jpg"));
    assert_eq!(item["publishedAt"], json!("2025-01-01T00:00:00Z"));
    assert!(item.get("image_url").is_none());
}

/// **VALUE**: Verifies the canonical key wins when both spellings are present.
///
/// **BUG THIS CATCHES**: Would catch if alias values overwrite canonical ones.
#[test]
fn given_both_alias_and_canonical_when_normalize_json_then_keeps_canonical() {
    let payload = json!({"imageUrl": "/canonical.jpg", "image_url": "/alias.jpg"});

    let normalized = normalize_json(payload);

    assert_eq!(normalized, json!({"imageUrl": "/canonical.jpg"}));
}
