mod builder;

use crate::NewsItem;

use serde_json::json;

/// **VALUE**: Verifies explicit `null` optional text fields decode as empty strings.
///
/// **WHY THIS MATTERS**: Upstream items often carry `"image_url": null`. If one such
/// item fails to decode, the whole list is rejected and a healthy feed is replaced by
/// the fallback corpus.
///
/// **BUG THIS CATCHES**: Would catch a plain `#[serde(default)]`, which only covers
/// missing keys.
#[test]
fn given_null_optional_fields_when_deserializing_then_empty_strings() {
    // GIVEN: Item with every optional text field set to null
    let raw = json!({
        "id": "n1",
        "title": "Headline",
        "excerpt": null,
        "category": null,
        "imageUrl": null,
        "publishedAt": "2025-03-01T10:00:00Z",
        "source": null
    });

    // WHEN: Deserializing
    let item: NewsItem = serde_json::from_value(raw).unwrap();

    // THEN: Empty strings, required fields intact
    assert_eq!(item.id, "n1");
    assert_eq!(item.excerpt, "");
    assert_eq!(item.category, "");
    assert_eq!(item.image_url, "");
    assert_eq!(item.source, "");
}

#[test]
fn given_missing_optional_fields_when_deserializing_then_empty_strings() {
    let raw = json!({"id": "n2", "title": "T", "publishedAt": "2025-03-01T10:00:00Z"});

    let item: NewsItem = serde_json::from_value(raw).unwrap();

    assert_eq!(item.excerpt, "");
    assert_eq!(item.image_url, "");
}
