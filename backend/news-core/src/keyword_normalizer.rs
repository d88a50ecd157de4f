//! Turns a raw search request body into a [`SearchQuery`].

use crate::error::validation::ValidationError;

use common::ErrorLocation;
use models::{MAX_KEYWORDS, SearchQuery};

use std::panic::Location;

use serde_json::Value;

pub const MALFORMED_BODY_MESSAGE: &str = "Request body must be valid JSON";
pub const KEYWORDS_ARRAY_REQUIRED_MESSAGE: &str = "A 'keywords' array is required";
pub const NO_VALID_KEYWORDS_MESSAGE: &str = "At least one valid keyword required";

/// Keep string entries that are non-empty after trimming, in order, and cut
/// the list at [`MAX_KEYWORDS`]. Truncation is silent.
pub fn normalize_keywords(raw: &[Value]) -> Vec<String> {
    raw.iter()
        .filter_map(Value::as_str)
        .filter(|keyword| !keyword.trim().is_empty())
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}

/// Validate a parsed body of the shape `{ "keywords": [...] }`.
#[track_caller]
pub fn query_from_body(body: &Value) -> Result<SearchQuery, ValidationError> {
    let raw = body
        .get("keywords")
        .and_then(Value::as_array)
        .ok_or_else(|| ValidationError::MissingKeywords {
            message: KEYWORDS_ARRAY_REQUIRED_MESSAGE.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let keywords = normalize_keywords(raw);

    SearchQuery::new(keywords).map_err(|_| ValidationError::NoValidKeywords {
        message: NO_VALID_KEYWORDS_MESSAGE.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Parse raw request bytes and validate them.
#[track_caller]
pub fn query_from_bytes(bytes: &[u8]) -> Result<SearchQuery, ValidationError> {
    let body: Value = serde_json::from_slice(bytes).map_err(|_| ValidationError::MalformedBody {
        message: MALFORMED_BODY_MESSAGE.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    query_from_body(&body)
}
