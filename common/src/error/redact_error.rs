use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when something tries to write a bearer token out of the process.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Token Serialization Refused: {message} {location}")]
    SerializationRefused {
        message: String,
        location: ErrorLocation,
    },
}
