//! HTTP surface: the personalized-news endpoint, keyword subscriptions and health.

use crate::error::NewsgateError;
use crate::state::AppState;

use news_core::cache_policy::UNCACHEABLE_CACHE_CONTROL;
use news_core::orchestrator::fault_outcome;
use news_core::{LocalSearchFallbackEngine, NewsOutcome};

use common::ErrorLocation;
use models::{KeywordListData, KeywordSubscription, ResponseEnvelope};

use std::any::Any;
use std::panic::Location;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, VARY};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use log::error;
use serde::Deserialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use uuid::Uuid;

pub const NEWS_ROUTE: &str = "/personalized-news";
pub const KEYWORDS_ROUTE: &str = "/keywords";
pub const KEYWORD_ROUTE: &str = "/keywords/{id}";
pub const HEALTH_ROUTE: &str = "/health";

const CORS_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// News bodies depend on the caller's identity, which comes from these headers.
pub const NEWS_VARY: &str = "Authorization, Cookie";

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(CORS_MAX_AGE);

    let fallback = state.orchestrator.fallback().clone();

    Router::new()
        .route(NEWS_ROUTE, get(browse_news).post(search_news))
        .route(KEYWORDS_ROUTE, get(list_keywords).post(add_keyword))
        .route(KEYWORD_ROUTE, delete(remove_keyword))
        .route(HEALTH_ROUTE, get(health))
        .layer(CatchPanicLayer::custom(
            move |panic: Box<dyn Any + Send + 'static>| panic_response(&fallback, panic),
        ))
        .layer(cors)
        .with_state(state)
}

/// Write an orchestrator outcome as status, `Cache-Control`, `Vary` and JSON body.
pub fn outcome_response(outcome: NewsOutcome) -> Response {
    let status = StatusCode::from_u16(outcome.status.as_u16())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let cache_control = outcome.cache_control();

    let mut response =
        (status, [(CACHE_CONTROL, cache_control)], Json(outcome.body)).into_response();
    // Appended so Vary values added by other layers survive
    response
        .headers_mut()
        .append(VARY, HeaderValue::from_static(NEWS_VARY));
    response
}

fn panic_response(
    fallback: &LocalSearchFallbackEngine,
    panic: Box<dyn Any + Send + 'static>,
) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {detail}");

    outcome_response(fault_outcome(fallback))
}

// ============================================
// NEWS
// ============================================

async fn browse_news(State(state): State<AppState>, headers: HeaderMap) -> Response {
    outcome_response(state.orchestrator.browse(&headers).await)
}

async fn search_news(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    outcome_response(state.orchestrator.search(&headers, &body).await)
}

// ============================================
// KEYWORDS
// ============================================

#[derive(Debug, Deserialize)]
struct NewKeyword {
    keyword: String,
}

async fn list_keywords(State(state): State<AppState>) -> Result<Response, NewsgateError> {
    let keywords = state.keywords.list().await?;
    Ok(no_store(
        StatusCode::OK,
        ResponseEnvelope::success(KeywordListData { keywords }),
    ))
}

async fn add_keyword(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, NewsgateError> {
    let request: NewKeyword =
        serde_json::from_slice(&body).map_err(|e| NewsgateError::InvalidRequest {
            message: format!("Request body must be {{\"keyword\": string}}: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let subscription = state.keywords.add(&request.keyword).await?;
    Ok(no_store(
        StatusCode::CREATED,
        ResponseEnvelope::<KeywordSubscription>::success(subscription),
    ))
}

async fn remove_keyword(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, NewsgateError> {
    let id = Uuid::parse_str(&id).map_err(|_| NewsgateError::InvalidRequest {
        message: format!("Invalid keyword id: {id}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let removed = state.keywords.remove(id).await?;
    Ok(no_store(
        StatusCode::OK,
        ResponseEnvelope::<KeywordSubscription>::success(removed),
    ))
}

fn no_store<T: serde::Serialize>(status: StatusCode, body: ResponseEnvelope<T>) -> Response {
    (status, [(CACHE_CONTROL, UNCACHEABLE_CACHE_CONTROL)], Json(body)).into_response()
}

// ============================================
// HEALTH
// ============================================

async fn health() -> &'static str {
    "ok"
}
