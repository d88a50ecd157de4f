//! GET/POST entry points for the personalized-news endpoint.
//!
//! Composes identity resolution, the upstream gateway, local fallback search
//! and cache policy into a [`NewsOutcome`]. Every path produces a body; the
//! only non-200 statuses are 400 for bad search input and 500 for internal
//! faults, and the 500 still ships the static corpus.

pub mod messages;

use crate::cache_policy::{CacheOutcome, cache_control};
use crate::config::GatewayConfig;
use crate::error::CoreError;
use crate::error::gateway::GatewayError;
use crate::fallback::LocalSearchFallbackEngine;
use crate::gateway::BackendGateway;
use crate::keyword_normalizer::query_from_bytes;
use crate::session::SessionResolver;

use common::HttpStatusCode;
use models::{EnvelopeData, IdentityState, ResponseEnvelope, SearchQuery};

use std::sync::Arc;

use http::HeaderMap;
use log::{error, info, warn};
use serde::Serialize;
use serde_json::Value;

use messages::{
    ANONYMOUS_DEGRADED_MESSAGE, ANONYMOUS_UPSELL_MESSAGE, AUTHENTICATED_DEGRADED_MESSAGE,
    FAULT_ERROR, FAULT_MESSAGE, NO_RESULTS_MESSAGE, local_results_message,
};

/// Response body: either our envelope or an upstream payload passed through.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NewsBody {
    Envelope(ResponseEnvelope),
    Upstream(Value),
}

/// Everything the HTTP layer needs to write a response.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsOutcome {
    pub status: HttpStatusCode,
    pub cache: CacheOutcome,
    pub body: NewsBody,
}

impl NewsOutcome {
    fn ok(cache: CacheOutcome, body: NewsBody) -> Self {
        Self {
            status: HttpStatusCode::OK,
            cache,
            body,
        }
    }

    pub fn cache_control(&self) -> &'static str {
        cache_control(self.cache)
    }

    /// The envelope, unless the upstream payload was passed through.
    pub fn envelope(&self) -> Option<&ResponseEnvelope> {
        match &self.body {
            NewsBody::Envelope(envelope) => Some(envelope),
            NewsBody::Upstream(_) => None,
        }
    }
}

/// Behavioural switches taken from [`GatewayConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorSettings {
    pub use_backend_search: bool,
    pub latest_limit: u32,
}

impl From<&GatewayConfig> for OrchestratorSettings {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            use_backend_search: config.use_backend_search,
            latest_limit: config.latest_limit,
        }
    }
}

#[derive(Clone)]
pub struct NewsOrchestrator {
    gateway: BackendGateway,
    sessions: Arc<dyn SessionResolver>,
    fallback: LocalSearchFallbackEngine,
    settings: OrchestratorSettings,
}

impl NewsOrchestrator {
    pub fn new(
        gateway: BackendGateway,
        sessions: Arc<dyn SessionResolver>,
        fallback: LocalSearchFallbackEngine,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            gateway,
            sessions,
            fallback,
            settings,
        }
    }

    /// Wire an orchestrator from validated config.
    pub fn from_config(
        config: &GatewayConfig,
        sessions: Arc<dyn SessionResolver>,
    ) -> Result<Self, CoreError> {
        let gateway = BackendGateway::new(&config.backend_url, config.upstream_timeout())?;
        let fallback =
            LocalSearchFallbackEngine::from_config_path(config.fallback_corpus_path.as_deref());

        Ok(Self::new(
            gateway,
            sessions,
            fallback,
            OrchestratorSettings::from(config),
        ))
    }

    pub fn fallback(&self) -> &LocalSearchFallbackEngine {
        &self.fallback
    }

    // ============================================
    // GET: browse
    // ============================================

    /// Browse feed: personalized when logged in, latest otherwise.
    pub async fn browse(&self, headers: &HeaderMap) -> NewsOutcome {
        let identity = self.sessions.resolve(headers);
        self.browse_as(&identity).await
    }

    pub async fn browse_as(&self, identity: &IdentityState) -> NewsOutcome {
        if identity.is_authenticated() {
            match self.gateway.fetch_personalized(identity).await {
                Ok(payload) => {
                    info!("Serving personalized feed from upstream");
                    NewsOutcome::ok(CacheOutcome::AuthedSuccess, NewsBody::Upstream(payload))
                }
                Err(e) => self.degraded_browse(identity, &e),
            }
        } else {
            match self.gateway.fetch_latest(self.settings.latest_limit).await {
                Ok(news) => {
                    info!("Serving {} latest items from upstream", news.len());
                    NewsOutcome::ok(
                        CacheOutcome::AnonSuccess,
                        NewsBody::Envelope(ResponseEnvelope::success(EnvelopeData::new(
                            news,
                            ANONYMOUS_UPSELL_MESSAGE,
                        ))),
                    )
                }
                Err(e) => self.degraded_browse(identity, &e),
            }
        }
    }

    fn degraded_browse(&self, identity: &IdentityState, cause: &GatewayError) -> NewsOutcome {
        warn!(
            "Browse falling back to static corpus (authenticated={}): {}",
            identity.is_authenticated(),
            cause
        );

        let message = if identity.is_authenticated() {
            AUTHENTICATED_DEGRADED_MESSAGE
        } else {
            ANONYMOUS_DEGRADED_MESSAGE
        };

        NewsOutcome::ok(
            CacheOutcome::Fallback,
            NewsBody::Envelope(ResponseEnvelope::success(EnvelopeData::new(
                self.fallback.corpus_vec(),
                message,
            ))),
        )
    }

    // ============================================
    // POST: keyword search
    // ============================================

    /// Keyword search from a raw JSON request body.
    pub async fn search(&self, headers: &HeaderMap, body: &[u8]) -> NewsOutcome {
        let query = match query_from_bytes(body) {
            Ok(query) => query,
            Err(e) => {
                info!("Rejected search request: {e}");
                return NewsOutcome {
                    status: HttpStatusCode::BAD_REQUEST,
                    cache: CacheOutcome::Uncacheable,
                    body: NewsBody::Envelope(ResponseEnvelope::failure(e.public_message())),
                };
            }
        };

        let identity = self.sessions.resolve(headers);
        match self.search_as(&query, &identity).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Search failed unexpectedly: {e}");
                self.fault()
            }
        }
    }

    /// Search with an already validated query.
    ///
    /// Upstream unavailability is absorbed here; only faults that are not
    /// upstream conditions are returned as errors.
    pub async fn search_as(
        &self,
        query: &SearchQuery,
        identity: &IdentityState,
    ) -> Result<NewsOutcome, CoreError> {
        if self.settings.use_backend_search {
            match self.gateway.search(query, identity).await {
                Ok(payload) => {
                    info!("Serving upstream search for {} keywords", query.len());
                    return Ok(NewsOutcome::ok(
                        CacheOutcome::SearchSuccess,
                        NewsBody::Upstream(payload),
                    ));
                }
                Err(e) if e.is_upstream_unavailable() => {
                    warn!("Upstream search unavailable, searching locally: {e}");
                }
                Err(e) => return Err(e.into()),
            }
        } else {
            info!("Backend search disabled, searching locally");
        }

        Ok(self.local_search(query))
    }

    fn local_search(&self, query: &SearchQuery) -> NewsOutcome {
        let matches = self.fallback.search(query);
        let keywords = query.keywords().to_vec();

        if matches.is_empty() {
            return NewsOutcome::ok(
                CacheOutcome::Fallback,
                NewsBody::Envelope(ResponseEnvelope::success(
                    EnvelopeData::new(Vec::new(), NO_RESULTS_MESSAGE).with_keywords(keywords),
                )),
            );
        }

        let message = local_results_message(matches.len());
        NewsOutcome::ok(
            CacheOutcome::SearchFallback,
            NewsBody::Envelope(ResponseEnvelope::success(
                EnvelopeData::new(matches, message).with_keywords(keywords),
            )),
        )
    }

    /// 500 response that still carries the full static corpus.
    pub fn fault(&self) -> NewsOutcome {
        fault_outcome(&self.fallback)
    }
}

/// Fault response built from an engine alone, for callers (such as a panic
/// handler) that have no orchestrator at hand.
pub fn fault_outcome(fallback: &LocalSearchFallbackEngine) -> NewsOutcome {
    NewsOutcome {
        status: HttpStatusCode::INTERNAL_SERVER_ERROR,
        cache: CacheOutcome::Uncacheable,
        body: NewsBody::Envelope(ResponseEnvelope::failure_with_data(
            FAULT_ERROR,
            EnvelopeData::new(fallback.corpus_vec(), FAULT_MESSAGE),
        )),
    }
}
