use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Rejected search input. Surfaced as HTTP 400 and never retried.
#[derive(Debug, ThisError)]
pub enum ValidationError {
    #[error("Malformed Body: {message} {location}")]
    MalformedBody {
        message: String,
        location: ErrorLocation,
    },

    #[error("Missing Keywords: {message} {location}")]
    MissingKeywords {
        message: String,
        location: ErrorLocation,
    },

    #[error("No Valid Keywords: {message} {location}")]
    NoValidKeywords {
        message: String,
        location: ErrorLocation,
    },
}

impl ValidationError {
    pub fn public_message(&self) -> &str {
        match self {
            ValidationError::MalformedBody { message, .. }
            | ValidationError::MissingKeywords { message, .. }
            | ValidationError::NoValidKeywords { message, .. } => message,
        }
    }
}
