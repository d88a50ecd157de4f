//! Upstream field-name normalization.
//!
//! The upstream service is not consistent about key casing: depending on the
//! endpoint, news items come back with `image_url`, `imageURL` or `imageUrl`.
//! Items are rewritten to the canonical camelCase keys that [`models::NewsItem`]
//! deserializes before decoding.

use serde_json::{Map, Value};

/// Alias → canonical key.
const FIELD_ALIASES: &[(&str, &str)] = &[
    ("image_url", "imageUrl"),
    ("imageURL", "imageUrl"),
    ("published_at", "publishedAt"),
    ("publishedAT", "publishedAt"),
    ("news_id", "id"),
];

/// Canonical name for `key`; unknown keys pass through unchanged.
pub fn normalize_key(key: &str) -> &str {
    FIELD_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(key)
}

/// Recursively rename aliased keys in objects and arrays.
///
/// When an object already carries the canonical key, the alias is dropped
/// rather than overwriting it.
pub fn normalize_json(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut normalized = Map::with_capacity(map.len());
            let mut aliased = Vec::new();

            for (key, val) in map {
                let canonical = normalize_key(&key);
                if canonical == key {
                    normalized.insert(key, normalize_json(val));
                } else {
                    aliased.push((canonical.to_string(), normalize_json(val)));
                }
            }

            for (key, val) in aliased {
                normalized.entry(key).or_insert(val);
            }

            Value::Object(normalized)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_json).collect()),
        other => other,
    }
}
