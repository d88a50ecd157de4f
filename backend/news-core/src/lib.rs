pub mod cache_policy;
pub mod config;
pub mod error;
pub mod fallback;
pub mod field_normalizer;
pub mod gateway;
pub mod keyword_normalizer;
pub mod keyword_store;
pub mod orchestrator;
pub mod session;

#[cfg(test)]
mod tests;

pub use cache_policy::{CacheOutcome, cache_control};
pub use config::GatewayConfig;
pub use fallback::LocalSearchFallbackEngine;
pub use gateway::{BackendGateway, Endpoint};
pub use keyword_store::{InMemoryKeywordRepository, KeywordRepository};
pub use orchestrator::{NewsBody, NewsOrchestrator, NewsOutcome};
pub use session::{BearerSessionResolver, SessionResolver};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const NEWS_API_PREFIX: &str = "api/news";
pub const PERSONALIZED_NEWS_PATH: &str = const_format::concatcp!(NEWS_API_PREFIX, "/personalized");
pub const LATEST_NEWS_PATH: &str = const_format::concatcp!(NEWS_API_PREFIX, "/latest");
pub const SEARCH_NEWS_PATH: &str = const_format::concatcp!(NEWS_API_PREFIX, "/search");
