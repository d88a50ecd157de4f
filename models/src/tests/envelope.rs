use crate::{EnvelopeData, NewsItemBuilder, ResponseEnvelope};

use serde_json::json;

/// **VALUE**: Verifies the wire shape of a success envelope.
///
/// **WHY THIS MATTERS**: The page reads `success`, `data.news` and `data.message`
/// directly. Renamed or extra-null fields break rendering.
///
/// **BUG THIS CATCHES**: Would catch if `skip_serializing_if` is removed and `error: null`
/// or `keywords: null` leak into the body.
#[test]
fn given_success_envelope_when_serialized_then_omits_error_and_keywords() {
    // GIVEN: A one-item success envelope
    let item = NewsItemBuilder::default()
        .with_id("n1")
        .with_title("Title")
        .with_image_url("https://cdn.example.com/a.jpg")
        .with_published_at_rfc3339("2025-01-15T09:00:00Z")
        .build()
        .unwrap();
    let envelope = ResponseEnvelope::success(EnvelopeData::new(vec![item], "hello"));

    // WHEN: Serializing
    let value = serde_json::to_value(&envelope).unwrap();

    // THEN: camelCase fields, no null error
    assert_eq!(value["success"], json!(true));
    assert_eq!(value["data"]["message"], json!("hello"));
    assert_eq!(value["data"]["news"][0]["imageUrl"], json!("https://cdn.example.com/a.jpg"));
    assert!(value["data"]["news"][0]["publishedAt"].is_string());
    assert!(value.get("error").is_none());
    assert!(value["data"].get("keywords").is_none());
}

#[test]
fn given_failure_envelope_when_serialized_then_has_error_only() {
    let envelope: ResponseEnvelope = ResponseEnvelope::failure("bad input");

    let value = serde_json::to_value(&envelope).unwrap();

    assert_eq!(value, json!({"success": false, "error": "bad input"}));
}

#[test]
fn given_failure_with_data_when_serialized_then_carries_both() {
    let envelope = ResponseEnvelope::failure_with_data(
        "boom",
        EnvelopeData::new(Vec::new(), "fallback").with_keywords(vec![String::from("AI")]),
    );

    let value = serde_json::to_value(&envelope).unwrap();

    assert_eq!(value["success"], json!(false));
    assert_eq!(value["error"], json!("boom"));
    assert_eq!(value["data"]["keywords"], json!(["AI"]));
}
