use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum KeywordStoreError {
    #[error("Keyword Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Keyword Not Found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Keyword Duplicate: {message} {location}")]
    Duplicate {
        message: String,
        location: ErrorLocation,
    },
}

impl KeywordStoreError {
    /// Message safe to show to the caller (no source location).
    pub fn public_message(&self) -> &str {
        match self {
            KeywordStoreError::Validation { message, .. }
            | KeywordStoreError::NotFound { message, .. }
            | KeywordStoreError::Duplicate { message, .. } => message,
        }
    }
}
