//! Keyword subscriptions behind a repository interface.
//!
//! Handlers only see [`KeywordRepository`]; the store is injected at startup.
//! [`InMemoryKeywordRepository`] keeps entries for the life of the process and
//! is not shared across instances.

use crate::error::keyword_store::KeywordStoreError;

use common::ErrorLocation;
use models::KeywordSubscription;

use std::panic::Location;

use async_trait::async_trait;
use log::info;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const MAX_KEYWORD_CHARS: usize = 50;

#[async_trait]
pub trait KeywordRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<KeywordSubscription>, KeywordStoreError>;

    async fn add(&self, keyword: &str) -> Result<KeywordSubscription, KeywordStoreError>;

    async fn remove(&self, id: Uuid) -> Result<KeywordSubscription, KeywordStoreError>;
}

/// Trim and check a keyword before it is stored.
#[track_caller]
pub fn validate_subscription_keyword(raw: &str) -> Result<String, KeywordStoreError> {
    let keyword = raw.trim();

    if keyword.is_empty() {
        return Err(KeywordStoreError::Validation {
            message: String::from("Keyword cannot be empty"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if keyword.chars().count() > MAX_KEYWORD_CHARS {
        return Err(KeywordStoreError::Validation {
            message: format!("Keyword must be at most {MAX_KEYWORD_CHARS} characters"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(keyword.to_string())
}

#[derive(Debug, Default)]
pub struct InMemoryKeywordRepository {
    entries: RwLock<Vec<KeywordSubscription>>,
}

impl InMemoryKeywordRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeywordRepository for InMemoryKeywordRepository {
    async fn list(&self) -> Result<Vec<KeywordSubscription>, KeywordStoreError> {
        Ok(self.entries.read().await.clone())
    }

    async fn add(&self, keyword: &str) -> Result<KeywordSubscription, KeywordStoreError> {
        let keyword = validate_subscription_keyword(keyword)?;
        let lowered = keyword.to_lowercase();

        let mut entries = self.entries.write().await;
        if entries.iter().any(|e| e.keyword.to_lowercase() == lowered) {
            return Err(KeywordStoreError::Duplicate {
                message: format!("Keyword '{keyword}' is already registered"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let subscription = KeywordSubscription::new(keyword);
        entries.push(subscription.clone());
        info!("Keyword subscription added: {}", subscription.id);
        Ok(subscription)
    }

    async fn remove(&self, id: Uuid) -> Result<KeywordSubscription, KeywordStoreError> {
        let mut entries = self.entries.write().await;
        let index = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| KeywordStoreError::NotFound {
                message: format!("Keyword {id} not found"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let removed = entries.remove(index);
        info!("Keyword subscription removed: {}", removed.id);
        Ok(removed)
    }
}
