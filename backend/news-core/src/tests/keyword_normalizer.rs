// Unit tests for keyword normalization and request validation

use crate::error::ValidationError;
use crate::keyword_normalizer::{
    KEYWORDS_ARRAY_REQUIRED_MESSAGE, NO_VALID_KEYWORDS_MESSAGE, normalize_keywords,
    query_from_body, query_from_bytes,
};

use models::MAX_KEYWORDS;
use serde_json::json;

/// **VALUE**: Verifies non-strings and blank strings are dropped while order is kept.
///
/// **WHY THIS MATTERS**: Clients send loosely typed arrays. Numbers or nulls must not
/// crash matching, and keyword order is echoed back to the UI.
///
/// **BUG THIS CATCHES**: Would catch if filtering reorders entries or keeps `" "`.
#[test]
fn given_mixed_entries_when_normalizing_then_keeps_valid_strings_in_order() {
    let raw = json!(["AI", 3, null, "  ", "반도체", {"k": "v"}, "", "Chips"]);

    let keywords = normalize_keywords(raw.as_array().unwrap());

    assert_eq!(keywords, vec!["AI", "반도체", "Chips"]);
}

/// **VALUE**: Verifies silent truncation to the first ten valid keywords.
///
/// **WHY THIS MATTERS**: Upstream search cost grows with keyword count; the cap keeps
/// a single request bounded.
///
/// **BUG THIS CATCHES**: Would catch truncation applied before filtering, which would
/// yield fewer than ten keywords when invalid entries appear early.
#[test]
fn given_more_than_ten_valid_keywords_when_normalizing_then_keeps_first_ten() {
    let mut raw = vec![json!(""), json!(42)];
    raw.extend((0..15).map(|i| json!(format!("kw{i}"))));

    let keywords = normalize_keywords(&raw);

    assert_eq!(keywords.len(), MAX_KEYWORDS);
    let expected: Vec<String> = (0..10).map(|i| format!("kw{i}")).collect();
    assert_eq!(keywords, expected);
}

#[test]
fn given_body_without_keywords_array_when_validating_then_missing_keywords_error() {
    for body in [json!({}), json!({"keywords": "AI"}), json!([]), json!({"keyword": ["AI"]})] {
        match query_from_body(&body) {
            Err(ValidationError::MissingKeywords { message, .. }) => {
                assert_eq!(message, KEYWORDS_ARRAY_REQUIRED_MESSAGE);
            }
            other => panic!("expected MissingKeywords for {body}, got {other:?}"),
        }
    }
}

/// **VALUE**: Verifies an array with nothing usable is rejected with the fixed message.
///
/// **BUG THIS CATCHES**: Would catch if an empty query slips through and reaches the
/// upstream search endpoint.
#[test]
fn given_only_invalid_keywords_when_validating_then_no_valid_keywords_error() {
    for body in [
        json!({"keywords": []}),
        json!({"keywords": ["", "   ", "\t"]}),
        json!({"keywords": [1, true, null]}),
    ] {
        match query_from_body(&body) {
            Err(ValidationError::NoValidKeywords { message, .. }) => {
                assert_eq!(message, NO_VALID_KEYWORDS_MESSAGE);
            }
            other => panic!("expected NoValidKeywords for {body}, got {other:?}"),
        }
    }
}

#[test]
fn given_invalid_json_bytes_when_validating_then_malformed_body_error() {
    let result = query_from_bytes(b"{not json");

    assert!(matches!(result, Err(ValidationError::MalformedBody { .. })));
}

#[test]
fn given_valid_bytes_when_validating_then_returns_query() {
    let query = query_from_bytes(br#"{"keywords": ["AI", " "]}"#).unwrap();

    assert_eq!(query.keywords(), ["AI"]);
}
