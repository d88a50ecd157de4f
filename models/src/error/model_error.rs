use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Construction failures for domain values.
#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Missing Field: {field} is required {location}")]
    MissingField {
        field: &'static str,
        location: ErrorLocation,
    },

    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },
}
