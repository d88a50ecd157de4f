use crate::helpers::{
    TEST_LATEST_LIMIT, TEST_TOKEN, UNREACHABLE_BACKEND, authed_headers, orchestrator,
    orchestrator_with_timeout, search_body, upstream_item,
};

use news_core::orchestrator::messages::{
    ANONYMOUS_DEGRADED_MESSAGE, ANONYMOUS_UPSELL_MESSAGE, AUTHENTICATED_DEGRADED_MESSAGE,
    NO_RESULTS_MESSAGE,
};
use news_core::{CacheOutcome, NewsBody};

use common::HttpStatusCode;

use std::time::Duration;

use http::HeaderMap;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ids(outcome: &news_core::NewsOutcome) -> Vec<String> {
    outcome
        .envelope()
        .and_then(|envelope| envelope.data.as_ref())
        .map(|data| data.news.iter().map(|item| item.id.clone()).collect())
        .unwrap_or_default()
}

// ============================================
// GET: browse
// ============================================

/// **VALUE**: Verifies the anonymous happy path rewraps latest news with the upsell message.
///
/// **WHY THIS MATTERS**: Anonymous responses are shared through public caches, so both
/// the body shape and the cache header must be the anonymous ones.
///
/// **BUG THIS CATCHES**: Would catch anonymous callers being routed to the personalized
/// endpoint or receiving the private cache header.
#[tokio::test]
async fn given_anonymous_caller_and_healthy_backend_when_browsing_then_latest_news_with_upsell() {
    // GIVEN: Upstream serving latest news
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news/latest"))
        .and(query_param("limit", TEST_LATEST_LIMIT.to_string().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "news": [upstream_item("u1", "One"), upstream_item("u2", "Two")] }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/news/personalized"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server.uri(), true);

    // WHEN: Browsing without credentials
    let outcome = orchestrator.browse(&HeaderMap::new()).await;

    // THEN: Upstream items in our envelope with the upsell message
    assert_eq!(outcome.status, HttpStatusCode::OK);
    assert_eq!(outcome.cache, CacheOutcome::AnonSuccess);
    assert_eq!(
        outcome.cache_control(),
        "public, s-maxage=300, stale-while-revalidate=600"
    );
    let envelope = outcome.envelope().expect("anonymous feed is wrapped");
    assert!(envelope.success);
    assert_eq!(ids(&outcome), vec!["u1", "u2"]);
    assert_eq!(
        envelope.data.as_ref().unwrap().message,
        ANONYMOUS_UPSELL_MESSAGE
    );
}

#[tokio::test]
async fn given_authenticated_caller_and_healthy_backend_when_browsing_then_payload_passes_through() {
    let server = MockServer::start().await;
    let payload = json!({"success": true, "data": {"news": [upstream_item("p1", "Mine")], "message": "curated"}});
    Mock::given(method("GET"))
        .and(path("/api/news/personalized"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server.uri(), true);

    let outcome = orchestrator.browse(&authed_headers()).await;

    assert_eq!(outcome.status, HttpStatusCode::OK);
    assert_eq!(outcome.cache_control(), "private, max-age=60");
    assert_eq!(outcome.body, NewsBody::Upstream(payload));
}

/// **VALUE**: Verifies both identities get a 200 with fallback content when upstream is down.
///
/// **WHY THIS MATTERS**: The page must never be blank. Degraded responses stay
/// `success: true` and differ only in the message.
///
/// **BUG THIS CATCHES**: Would catch a gateway failure escaping as a 5xx or an empty list.
#[tokio::test]
async fn given_backend_down_when_browsing_then_fallback_corpus_for_both_identities() {
    // GIVEN: Upstream failing every request
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server.uri(), true);
    let corpus_len = orchestrator.fallback().corpus().len();

    // WHEN: Browsing as each identity
    let anonymous = orchestrator.browse(&HeaderMap::new()).await;
    let authenticated = orchestrator.browse(&authed_headers()).await;

    // THEN: Same corpus, different messages, fallback cache policy
    for outcome in [&anonymous, &authenticated] {
        assert_eq!(outcome.status, HttpStatusCode::OK);
        assert_eq!(outcome.cache, CacheOutcome::Fallback);
        let envelope = outcome.envelope().expect("fallback is wrapped");
        assert!(envelope.success);
        assert_eq!(envelope.data.as_ref().unwrap().news.len(), corpus_len);
    }
    assert_eq!(
        anonymous.envelope().unwrap().data.as_ref().unwrap().message,
        ANONYMOUS_DEGRADED_MESSAGE
    );
    assert_eq!(
        authenticated.envelope().unwrap().data.as_ref().unwrap().message,
        AUTHENTICATED_DEGRADED_MESSAGE
    );
}

#[tokio::test]
async fn given_unreachable_backend_when_browsing_then_fallback_corpus() {
    let orchestrator = orchestrator(UNREACHABLE_BACKEND, true);

    let outcome = orchestrator.browse(&HeaderMap::new()).await;

    assert_eq!(outcome.status, HttpStatusCode::OK);
    assert_eq!(outcome.cache, CacheOutcome::Fallback);
    assert!(!ids(&outcome).is_empty());
}

#[tokio::test]
async fn given_slow_backend_when_browsing_then_fallback_before_upstream_answers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([upstream_item("late", "Late")]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let orchestrator =
        orchestrator_with_timeout(&server.uri(), true, Duration::from_millis(100));

    let outcome = orchestrator.browse(&HeaderMap::new()).await;

    assert_eq!(outcome.cache, CacheOutcome::Fallback);
    assert!(!ids(&outcome).contains(&String::from("late")));
}

#[tokio::test]
async fn given_latest_payload_without_news_list_when_browsing_anonymously_then_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server.uri(), true);

    let outcome = orchestrator.browse(&HeaderMap::new()).await;

    assert_eq!(outcome.cache, CacheOutcome::Fallback);
}

// ============================================
// POST: keyword search
// ============================================

/// **VALUE**: Verifies invalid search input is rejected before any upstream call.
///
/// **WHY THIS MATTERS**: Bad input is the only 400 this endpoint returns; forwarding it
/// would waste an upstream call and hide the client bug.
///
/// **BUG THIS CATCHES**: Would catch validation running after the gateway call.
#[tokio::test]
async fn given_empty_keyword_list_when_searching_then_bad_request_without_upstream_call() {
    // GIVEN: Search mock that must never be hit
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/news/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server.uri(), true);

    // WHEN: Posting empty and junk keyword lists
    let empty = orchestrator
        .search(&HeaderMap::new(), &search_body(json!([])))
        .await;
    let junk = orchestrator
        .search(&HeaderMap::new(), &search_body(json!(["", "   ", 7, null])))
        .await;
    let not_json = orchestrator.search(&HeaderMap::new(), b"not json").await;

    // THEN: 400, uncacheable, failure envelope without data
    for outcome in [&empty, &junk, &not_json] {
        assert_eq!(outcome.status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(outcome.cache_control(), "no-store");
        let envelope = outcome.envelope().unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert!(envelope.error.is_some());
    }
}

#[tokio::test]
async fn given_backend_search_disabled_when_searching_ai_then_local_matches_in_corpus_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server.uri(), false);

    let outcome = orchestrator
        .search(&HeaderMap::new(), &search_body(json!(["AI"])))
        .await;

    assert_eq!(outcome.status, HttpStatusCode::OK);
    assert_eq!(outcome.cache, CacheOutcome::SearchFallback);
    assert_eq!(ids(&outcome), vec!["fallback-1", "fallback-2", "fallback-8"]);
    let data = outcome.envelope().unwrap().data.as_ref().unwrap();
    assert_eq!(data.message, "Found 3 news items matching your keywords.");
    assert_eq!(data.keywords.as_deref(), Some(&[String::from("AI")][..]));
}

#[tokio::test]
async fn given_korean_keyword_when_searching_locally_then_matches_title() {
    let orchestrator = orchestrator(UNREACHABLE_BACKEND, false);

    let outcome = orchestrator
        .search(&HeaderMap::new(), &search_body(json!(["삼성전자"])))
        .await;

    assert_eq!(ids(&outcome), vec!["fallback-1"]);
}

#[tokio::test]
async fn given_no_local_match_when_searching_then_empty_list_with_hint() {
    let orchestrator = orchestrator(UNREACHABLE_BACKEND, false);

    let outcome = orchestrator
        .search(&HeaderMap::new(), &search_body(json!(["zzz-nothing-matches"])))
        .await;

    assert_eq!(outcome.status, HttpStatusCode::OK);
    assert_eq!(outcome.cache, CacheOutcome::Fallback);
    let envelope = outcome.envelope().unwrap();
    assert!(envelope.success);
    let data = envelope.data.as_ref().unwrap();
    assert!(data.news.is_empty());
    assert_eq!(data.message, NO_RESULTS_MESSAGE);
}

#[tokio::test]
async fn given_healthy_backend_search_when_searching_then_upstream_payload_passes_through() {
    let server = MockServer::start().await;
    let payload = json!({"success": true, "data": {"news": [upstream_item("s1", "Hit")]}});
    Mock::given(method("POST"))
        .and(path("/api/news/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server.uri(), true);

    let outcome = orchestrator
        .search(&authed_headers(), &search_body(json!(["AI"])))
        .await;

    assert_eq!(outcome.cache, CacheOutcome::SearchSuccess);
    assert_eq!(outcome.cache_control(), "public, max-age=60");
    assert_eq!(outcome.body, NewsBody::Upstream(payload));
}

/// **VALUE**: Verifies a failing upstream search degrades to local search.
///
/// **WHY THIS MATTERS**: Search is user-initiated; answering 5xx for an upstream
/// outage would show an error where the corpus could still answer.
///
/// **BUG THIS CATCHES**: Would catch upstream status errors escaping as faults.
#[tokio::test]
async fn given_backend_search_failing_when_searching_then_local_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/news/search"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server.uri(), true);

    let outcome = orchestrator
        .search(&HeaderMap::new(), &search_body(json!(["AI"])))
        .await;

    assert_eq!(outcome.status, HttpStatusCode::OK);
    assert_eq!(outcome.cache, CacheOutcome::SearchFallback);
    assert_eq!(ids(&outcome), vec!["fallback-1", "fallback-2", "fallback-8"]);
}

#[tokio::test]
async fn given_more_than_ten_keywords_when_searching_then_only_first_ten_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/news/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server.uri(), true);
    let keywords: Vec<String> = (1..=12).map(|i| format!("kw{i}")).collect();

    orchestrator
        .search(&HeaderMap::new(), &search_body(json!(keywords)))
        .await;

    let requests = server.received_requests().await.unwrap();
    let forwarded: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let forwarded = forwarded["keywords"].as_array().unwrap();
    assert_eq!(forwarded.len(), 10);
    assert_eq!(forwarded[0], "kw1");
    assert_eq!(forwarded[9], "kw10");
}

#[tokio::test]
async fn given_fault_when_building_fault_outcome_then_500_with_corpus() {
    let orchestrator = orchestrator(UNREACHABLE_BACKEND, false);

    let outcome = orchestrator.fault();

    assert_eq!(outcome.status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(outcome.cache_control(), "no-store");
    let envelope = outcome.envelope().unwrap();
    assert!(!envelope.success);
    assert!(envelope.error.is_some());
    assert_eq!(
        envelope.data.as_ref().unwrap().news.len(),
        orchestrator.fallback().corpus().len()
    );
}
