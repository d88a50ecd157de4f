//! Validated keyword query.

use crate::{ErrorLocation, ModelError};

use std::panic::Location;

/// Upper bound on keywords per search request.
pub const MAX_KEYWORDS: usize = 10;

/// Ordered, non-empty set of search keywords.
///
/// Invariants: 1..=[`MAX_KEYWORDS`] entries, every entry non-empty after
/// trimming. Case is preserved; matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    keywords: Vec<String>,
}

impl SearchQuery {
    #[track_caller]
    pub fn new(keywords: Vec<String>) -> Result<Self, ModelError> {
        if keywords.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Search query needs at least one keyword"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if keywords.len() > MAX_KEYWORDS {
            return Err(ModelError::Validation {
                message: format!(
                    "Search query has {} keywords (max {MAX_KEYWORDS})",
                    keywords.len()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ModelError::Validation {
                message: String::from("Search keywords cannot be blank"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self { keywords })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Lowercased, trimmed keywords for case-insensitive matching.
    pub fn needles(&self) -> Vec<String> {
        self.keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}
