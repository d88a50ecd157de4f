use crate::error::NewsgateError;

use news_core::{
    BearerSessionResolver, GatewayConfig, InMemoryKeywordRepository, KeywordRepository,
    NewsOrchestrator,
};

use std::sync::Arc;

use log::info;

/// Shared handler state. Cloned per request; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<NewsOrchestrator>,
    pub keywords: Arc<dyn KeywordRepository>,
}

impl AppState {
    pub fn new(orchestrator: NewsOrchestrator, keywords: Arc<dyn KeywordRepository>) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            keywords,
        }
    }

    /// Production wiring: bearer/cookie sessions and an in-memory keyword store.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, NewsgateError> {
        let orchestrator =
            NewsOrchestrator::from_config(config, Arc::new(BearerSessionResolver::default()))?;

        info!(
            "Fallback corpus ready with {} items",
            orchestrator.fallback().corpus().len()
        );

        Ok(Self::new(
            orchestrator,
            Arc::new(InMemoryKeywordRepository::new()),
        ))
    }
}
