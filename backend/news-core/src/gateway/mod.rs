//! Bounded-time calls to the upstream news service.
//!
//! Every call is a single attempt raced against a timer. Timeouts, network
//! failures, non-2xx statuses and undecodable bodies all come back as a
//! [`GatewayError`] for which [`GatewayError::is_upstream_unavailable`] holds;
//! the orchestrator turns those into fallback content. There is no retry here:
//! the end-user latency budget wins over upstream resilience.

use crate::error::gateway::GatewayError;
use crate::field_normalizer::normalize_json;
use crate::{LATEST_NEWS_PATH, PERSONALIZED_NEWS_PATH, SEARCH_NEWS_PATH};

use common::{ErrorLocation, HttpStatusCode};
use models::{IdentityState, NewsItem, SearchQuery};

use std::panic::Location;
use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client, Method};
use serde_json::{Value, json};
use url::Url;

pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);
const LATEST_LIMIT_QUERY_KEY: &str = "limit";
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Upstream endpoints the gateway knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Personalized,
    Latest { limit: u32 },
    Search,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Personalized => PERSONALIZED_NEWS_PATH,
            Endpoint::Latest { .. } => LATEST_NEWS_PATH,
            Endpoint::Search => SEARCH_NEWS_PATH,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::Personalized | Endpoint::Latest { .. } => Method::GET,
            Endpoint::Search => Method::POST,
        }
    }
}

#[derive(Clone)]
pub struct BackendGateway {
    base_url: Url,
    client: Client,
    timeout: Duration,
}

impl BackendGateway {
    pub fn new(base_url_str: &str, timeout: Duration) -> Result<Self, GatewayError> {
        Self::with_client(base_url_str, Client::new(), timeout)
    }

    /// Build around an existing client so connection pools can be shared.
    pub fn with_client(
        base_url_str: &str,
        client: Client,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        // Without a trailing slash `Url::join` would drop the last path segment
        let base_url = if base_url_str.ends_with('/') {
            Url::parse(base_url_str)?
        } else {
            Url::parse(&format!("{base_url_str}/"))?
        };

        Ok(Self {
            base_url,
            client,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL for `endpoint`, including its query string.
    pub fn endpoint_url(&self, endpoint: &Endpoint) -> Result<Url, GatewayError> {
        let mut url = self.base_url.join(endpoint.path())?;
        if let Endpoint::Latest { limit } = endpoint {
            url.query_pairs_mut()
                .append_pair(LATEST_LIMIT_QUERY_KEY, &limit.to_string());
        }
        Ok(url)
    }

    /// Perform one upstream call and decode the JSON body.
    ///
    /// `bearer` is sent as `Authorization: Bearer <bearer>` when present, even
    /// if empty. The whole exchange (connect, status, body) shares one timeout.
    pub async fn call(
        &self,
        endpoint: &Endpoint,
        body: Option<&Value>,
        bearer: Option<&str>,
    ) -> Result<Value, GatewayError> {
        let url = self.endpoint_url(endpoint)?;

        let mut request = self.client.request(endpoint.method(), url.clone());
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        if let Some(json_body) = body {
            request = request.json(json_body);
        }

        debug!("Upstream {} {}", endpoint.method(), url);

        let exchange = async {
            let response = request.send().await?;
            let status = HttpStatusCode::from(response.status().as_u16());

            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(GatewayError::Status {
                    status,
                    message: text.chars().take(ERROR_BODY_PREVIEW_CHARS).collect(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }

            let bytes = response.bytes().await?;
            let json: Value = serde_json::from_slice(&bytes)?;
            Ok::<Value, GatewayError>(json)
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => {
                if let Err(e) = &result {
                    warn!("Upstream call to {} failed: {}", endpoint.path(), e);
                }
                result
            }
            Err(_) => {
                warn!(
                    "Upstream call to {} timed out after {:?}",
                    endpoint.path(),
                    self.timeout
                );
                Err(GatewayError::Timeout {
                    message: format!("{} did not respond within {:?}", url, self.timeout),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }

    /// Personalized feed for an authenticated identity. Raw payload.
    pub async fn fetch_personalized(
        &self,
        identity: &IdentityState,
    ) -> Result<Value, GatewayError> {
        self.call(
            &Endpoint::Personalized,
            None,
            Some(identity.bearer_value()),
        )
        .await
    }

    /// Latest news for anonymous callers, decoded into items.
    pub async fn fetch_latest(&self, limit: u32) -> Result<Vec<NewsItem>, GatewayError> {
        let payload = self.call(&Endpoint::Latest { limit }, None, None).await?;
        decode_news_list(payload)
    }

    /// Upstream keyword search. Anonymous callers send an empty bearer token.
    pub async fn search(
        &self,
        query: &SearchQuery,
        identity: &IdentityState,
    ) -> Result<Value, GatewayError> {
        let body = json!({ "keywords": query.keywords() });
        self.call(&Endpoint::Search, Some(&body), Some(identity.bearer_value()))
            .await
    }
}

/// Pull the news list out of an upstream payload.
///
/// Accepted shapes: a bare array, `{ "news": [...] }` and
/// `{ "data": { "news": [...] } }`. Anything else is a malformed body.
#[track_caller]
pub fn decode_news_list(payload: Value) -> Result<Vec<NewsItem>, GatewayError> {
    let list = match payload {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => match map.remove("news") {
            Some(news) => news,
            None => match map.remove("data") {
                Some(Value::Object(mut data)) => data.remove("news").unwrap_or(Value::Null),
                _ => Value::Null,
            },
        },
        _ => Value::Null,
    };

    if !list.is_array() {
        return Err(GatewayError::MalformedBody {
            message: String::from("Upstream payload has no news list"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let items: Vec<NewsItem> = serde_json::from_value(normalize_json(list))?;
    Ok(items)
}
