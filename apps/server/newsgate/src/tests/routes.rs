// Unit tests for writing orchestrator outcomes as HTTP responses

use crate::routes::{NEWS_VARY, outcome_response};

use news_core::LocalSearchFallbackEngine;
use news_core::orchestrator::fault_outcome;

use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, VARY};

/// **VALUE**: Verifies every news response varies on the identity headers.
///
/// **WHY THIS MATTERS**: The same URL returns different bodies for anonymous and
/// logged-in callers. Without `Vary`, a CDN serves one caller's body to the other.
///
/// **BUG THIS CATCHES**: Would catch `outcome_response` dropping the `Vary` header.
#[test]
fn given_outcome_when_writing_response_then_status_cache_and_vary_set() {
    // GIVEN: A fault outcome over the bundled corpus
    let outcome = fault_outcome(&LocalSearchFallbackEngine::bundled());

    // WHEN: Writing it as a response
    let response = outcome_response(outcome);

    // THEN: Status, cache policy and identity Vary
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
    assert_eq!(response.headers()[VARY], NEWS_VARY);
}
