use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

/// Failures of a single upstream call.
///
/// Everything except [`GatewayError::UrlParse`] is an "upstream unavailable"
/// condition that callers recover from with fallback content.
#[derive(Debug, ThisError)]
pub enum GatewayError {
    #[error("Upstream Timeout: {message} {location}")]
    Timeout {
        message: String,
        location: ErrorLocation,
    },

    #[error("Upstream Network Error: {message} {location}")]
    Network {
        message: String,
        location: ErrorLocation,
    },

    #[error("Upstream Status Error: HTTP {status} - {message} {location}")]
    Status {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Upstream Malformed Body: {message} {location}")]
    MalformedBody {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },
}

impl GatewayError {
    /// True for conditions the fallback path is designed to absorb.
    pub fn is_upstream_unavailable(&self) -> bool {
        !matches!(self, GatewayError::UrlParse { .. })
    }
}

impl From<url::ParseError> for GatewayError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        GatewayError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        GatewayError::Network {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        GatewayError::MalformedBody {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
