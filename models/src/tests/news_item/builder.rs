use crate::{ModelError, NewsItemBuilder};

fn complete_builder() -> NewsItemBuilder {
    NewsItemBuilder::default()
        .with_id("news-1")
        .with_title("AI chip production begins")
        .with_excerpt("Mass production of the new memory line has started.")
        .with_category("economy")
        .with_image_url("/images/fallback/chip.jpg")
        .with_published_at_rfc3339("2025-01-15T09:00:00Z")
        .with_source("Newswire")
}

/// **VALUE**: Verifies a fully populated builder produces the expected item.
///
/// **WHY THIS MATTERS**: The bundled fallback corpus is built through this builder.
/// If a field is dropped here, every degraded response ships incomplete cards.
///
/// **BUG THIS CATCHES**: Would catch swapped or forgotten field assignments in `build()`.
#[test]
fn given_complete_builder_when_building_then_returns_news_item() {
    // GIVEN: All fields set
    // WHEN: Building
    let item = complete_builder().build().unwrap();

    // THEN: Fields carried over
    assert_eq!(item.id, "news-1");
    assert_eq!(item.title, "AI chip production begins");
    assert_eq!(item.category, "economy");
    assert_eq!(item.image_url, "/images/fallback/chip.jpg");
    assert_eq!(item.source, "Newswire");
    assert_eq!(item.published_at.to_rfc3339(), "2025-01-15T09:00:00+00:00");
}

/// **VALUE**: Verifies missing ids are rejected.
///
/// **WHY THIS MATTERS**: The UI keys list rows by id; items without one render
/// as duplicates or not at all.
///
/// **BUG THIS CATCHES**: Would catch if the required-field check is removed.
#[test]
fn given_missing_id_when_building_then_returns_missing_field_error() {
    // GIVEN: Builder without id
    let builder = NewsItemBuilder::default()
        .with_title("Title")
        .with_published_at_rfc3339("2025-01-15T09:00:00Z");

    // WHEN: Building
    let result = builder.build();

    // THEN: Error naming the field
    match result.unwrap_err() {
        ModelError::MissingField { field, .. } => assert_eq!(field, "id"),
        other => panic!("expected MissingField, got {other}"),
    }
}

/// **VALUE**: Verifies whitespace-only titles are rejected.
///
/// **WHY THIS MATTERS**: Fallback search matches on titles; an empty title makes an
/// item unreachable by search and shows a blank headline.
///
/// **BUG THIS CATCHES**: Would catch if the check uses `is_empty()` without trimming.
#[test]
fn given_blank_title_when_building_then_returns_validation_error() {
    let result = complete_builder().with_title("   ").build();

    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Title cannot be empty");
        }
        other => panic!("expected Validation, got {other}"),
    }
}

/// **VALUE**: Verifies an unparsable timestamp surfaces as a missing timestamp.
///
/// **BUG THIS CATCHES**: Would catch if the RFC 3339 helper silently substitutes "now",
/// which would reorder fallback items on every restart.
#[test]
fn given_invalid_timestamp_when_building_then_returns_missing_field_error() {
    let result = complete_builder()
        .with_published_at_rfc3339("yesterday")
        .build();

    match result.unwrap_err() {
        ModelError::MissingField { field, .. } => assert_eq!(field, "publishedAt"),
        other => panic!("expected MissingField, got {other}"),
    }
}

/// **VALUE**: Verifies image URLs must be relative paths or http(s).
///
/// **BUG THIS CATCHES**: Would catch if scheme validation is removed and `javascript:`
/// URLs reach the page.
#[test]
fn given_invalid_image_scheme_when_building_then_returns_validation_error() {
    let result = complete_builder()
        .with_image_url("javascript:alert(1)")
        .build();

    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert!(message.starts_with("Invalid image URL format:"));
        }
        other => panic!("expected Validation, got {other}"),
    }
}

#[test]
fn given_item_when_checking_mentions_then_matches_title_or_excerpt_case_insensitively() {
    let item = complete_builder().build().unwrap();

    assert!(item.mentions("ai chip"));
    assert!(item.mentions("memory"));
    assert!(!item.mentions("newswire"), "source is not searched");
}
