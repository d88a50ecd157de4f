use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A keyword the user follows, managed through the keyword endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSubscription {
    pub id: Uuid,
    pub keyword: String,
    pub created_at: DateTime<Utc>,
}

impl KeywordSubscription {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            keyword: keyword.into(),
            created_at: Utc::now(),
        }
    }
}
