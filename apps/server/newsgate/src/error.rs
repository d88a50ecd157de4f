use news_core::cache_policy::UNCACHEABLE_CACHE_CONTROL;
use news_core::error::{ConfigError, CoreError, KeywordStoreError};

use common::ErrorLocation;
use models::ResponseEnvelope;

use axum::Json;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors raised by the HTTP server.
///
/// Startup failures end the process. Request failures are rendered as a
/// failure envelope, with the source location kept out of the body.
#[derive(Debug, Error)]
pub enum NewsgateError {
    /// Logger, log directory or state setup failed
    #[error("Startup Error: {message} {location}")]
    Startup {
        message: String,
        location: ErrorLocation,
    },

    /// Listen address could not be bound
    #[error("Bind Error: {message} {location}")]
    Bind {
        message: String,
        location: ErrorLocation,
    },

    /// Server loop exited with an error
    #[error("Serve Error: {message} {location}")]
    Serve {
        message: String,
        location: ErrorLocation,
    },

    /// Request body or path could not be understood
    #[error("Invalid Request: {message} {location}")]
    InvalidRequest {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Keyword(#[from] KeywordStoreError),
}

impl From<ConfigError> for NewsgateError {
    fn from(error: ConfigError) -> Self {
        NewsgateError::Core(CoreError::Config(error))
    }
}

impl NewsgateError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            NewsgateError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            NewsgateError::Keyword(e) | NewsgateError::Core(CoreError::KeywordStore(e)) => {
                keyword_status(e)
            }
            NewsgateError::Core(CoreError::Validation(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message for the response body.
    pub fn public_message(&self) -> String {
        match self {
            NewsgateError::InvalidRequest { message, .. } => message.clone(),
            NewsgateError::Keyword(e) | NewsgateError::Core(CoreError::KeywordStore(e)) => {
                e.public_message().to_string()
            }
            NewsgateError::Core(CoreError::Validation(e)) => e.public_message().to_string(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

fn keyword_status(error: &KeywordStoreError) -> StatusCode {
    match error {
        KeywordStoreError::Validation { .. } => StatusCode::BAD_REQUEST,
        KeywordStoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        KeywordStoreError::Duplicate { .. } => StatusCode::CONFLICT,
    }
}

impl IntoResponse for NewsgateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {self}");
        } else {
            log::info!("Request rejected: {self}");
        }

        let body = ResponseEnvelope::<()>::failure(self.public_message());
        (status, [(CACHE_CONTROL, UNCACHEABLE_CACHE_CONTROL)], Json(body)).into_response()
    }
}
