//! The uniform `{ success, data | error }` response shape.

use crate::{KeywordSubscription, NewsItem};

use serde::{Deserialize, Serialize};

/// Body returned by every gateway endpoint, on every code path.
///
/// `data` and `error` may both be present: hard failures still ship fallback
/// content so the page always has something to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T = EnvelopeData> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ResponseEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn failure_with_data(error: impl Into<String>, data: T) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(error.into()),
        }
    }
}

/// News payload of an envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeData {
    pub news: Vec<NewsItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    pub message: String,
}

impl EnvelopeData {
    pub fn new(news: Vec<NewsItem>, message: impl Into<String>) -> Self {
        Self {
            news,
            keywords: None,
            message: message.into(),
        }
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = Some(keywords);
        self
    }
}

/// Payload of the keyword subscription endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordListData {
    pub keywords: Vec<KeywordSubscription>,
}
