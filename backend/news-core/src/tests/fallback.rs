// Unit tests for the fallback corpus and local search

use crate::fallback::LocalSearchFallbackEngine;

use models::SearchQuery;

use std::io::Write;
use std::path::Path;

fn query(keywords: &[&str]) -> SearchQuery {
    SearchQuery::new(keywords.iter().map(|k| k.to_string()).collect()).unwrap()
}

fn ids(items: &[models::NewsItem]) -> Vec<&str> {
    items.iter().map(|item| item.id.as_str()).collect()
}

#[test]
fn given_bundled_engine_when_reading_corpus_then_is_non_empty_with_unique_ids() {
    let engine = LocalSearchFallbackEngine::bundled();

    let corpus = engine.corpus();
    let mut seen = std::collections::HashSet::new();

    assert!(!corpus.is_empty());
    assert!(corpus.iter().all(|item| seen.insert(item.id.clone())));
}

/// **VALUE**: Verifies the "AI" search hits every title/excerpt mention, any case.
///
/// **WHY THIS MATTERS**: This is the main degraded search path; missing a match means
/// users see "no results" for content that is on the page a moment later.
///
/// **BUG THIS CATCHES**: Would catch case-sensitive matching (the corpus spells it "AI")
/// or whole-word matching (which would miss "OpenAI").
#[test]
fn given_ai_keyword_when_searching_then_returns_items_mentioning_ai() {
    let engine = LocalSearchFallbackEngine::bundled();

    let results = engine.search(&query(&["ai"]));

    assert_eq!(ids(&results), vec!["fallback-1", "fallback-2", "fallback-8"]);
}

/// **VALUE**: Verifies a Korean company name only matches the relevant article.
///
/// **BUG THIS CATCHES**: Would catch an any-match bug that returns sports items.
#[test]
fn given_company_keyword_when_searching_then_excludes_unrelated_items() {
    let engine = LocalSearchFallbackEngine::bundled();

    let results = engine.search(&query(&["삼성전자"]));

    assert_eq!(ids(&results), vec!["fallback-1"]);
    assert!(results.iter().all(|item| item.category != "스포츠"));
}

#[test]
fn given_multiple_keywords_when_searching_then_matches_any_keyword_in_corpus_order() {
    let engine = LocalSearchFallbackEngine::bundled();

    let results = engine.search(&query(&["야구", "배터리"]));

    assert_eq!(ids(&results), vec!["fallback-5", "fallback-7"]);
}

/// **VALUE**: Verifies local search is idempotent.
///
/// **WHY THIS MATTERS**: Local results are cached publicly; two replicas answering the
/// same query must agree.
///
/// **BUG THIS CATCHES**: Would catch any ordering that depends on hashing or time.
#[test]
fn given_same_query_when_searching_twice_then_results_identical() {
    let engine = LocalSearchFallbackEngine::bundled();
    let q = query(&["AI"]);

    assert_eq!(engine.search(&q), engine.search(&q));
}

#[test]
fn given_unmatched_keyword_when_searching_then_returns_empty() {
    let engine = LocalSearchFallbackEngine::bundled();

    assert!(engine.search(&query(&["quantum"])).is_empty());
}

#[test]
fn given_corpus_file_with_aliases_when_loading_then_items_decoded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"news_id": "custom-1", "title": "Local headline", "image_url": "/x.jpg", "published_at": "2025-02-01T00:00:00Z"}}]"#
    )
    .unwrap();

    let engine = LocalSearchFallbackEngine::from_file(file.path()).unwrap();

    assert_eq!(ids(engine.corpus()), vec!["custom-1"]);
    assert_eq!(engine.corpus()[0].image_url, "/x.jpg");
}

/// **VALUE**: Verifies unusable corpus files fall back to the bundled corpus.
///
/// **WHY THIS MATTERS**: The fallback corpus is the last line of defence; a bad file
/// must not leave degraded responses empty.
///
/// **BUG THIS CATCHES**: Would catch if an empty or missing file yields an empty engine.
#[test]
fn given_unusable_corpus_file_when_loading_leniently_then_uses_bundled() {
    let mut empty = tempfile::NamedTempFile::new().unwrap();
    write!(empty, "[]").unwrap();

    let bundled_len = LocalSearchFallbackEngine::bundled().corpus().len();

    for path in [empty.path(), Path::new("/nonexistent/corpus.json")] {
        let engine = LocalSearchFallbackEngine::from_file_or_bundled(path);
        assert_eq!(engine.corpus().len(), bundled_len);
    }

    assert!(LocalSearchFallbackEngine::from_file(empty.path()).is_err());
}
