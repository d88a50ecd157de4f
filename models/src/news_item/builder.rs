use crate::error::model_error::ModelError;
use crate::{ErrorLocation, NewsItem};

use std::panic::Location;

use chrono::{DateTime, Utc};

/// Builder for creating validated NewsItem instances.
///
/// Used for the bundled fallback corpus and by tests; upstream items arrive
/// through serde instead.
#[derive(Debug, Default)]
pub struct NewsItemBuilder {
    id: Option<String>,
    title: Option<String>,
    excerpt: Option<String>,
    category: Option<String>,
    image_url: Option<String>,
    published_at: Option<DateTime<Utc>>,
    source: Option<String>,
}

impl NewsItemBuilder {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    /// Parse an RFC 3339 timestamp. An unparsable value leaves the field unset,
    /// which `build()` then reports.
    pub fn with_published_at_rfc3339(mut self, published_at: &str) -> Self {
        self.published_at = DateTime::parse_from_rfc3339(published_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Build the NewsItem with validation.
    #[track_caller]
    pub fn build(self) -> Result<NewsItem, ModelError> {
        let id = self.id.ok_or_else(|| ModelError::MissingField {
            field: "id",
            location: ErrorLocation::from(Location::caller()),
        })?;

        if id.trim().is_empty() {
            return Err(ModelError::Validation {
                message: String::from("News id cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let title = self.title.ok_or_else(|| ModelError::MissingField {
            field: "title",
            location: ErrorLocation::from(Location::caller()),
        })?;

        if title.trim().is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Title cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let published_at = self.published_at.ok_or_else(|| ModelError::MissingField {
            field: "publishedAt",
            location: ErrorLocation::from(Location::caller()),
        })?;

        let image_url = self.image_url.unwrap_or_default();
        if !image_url.is_empty()
            && !image_url.starts_with('/')
            && !image_url.starts_with("http://")
            && !image_url.starts_with("https://")
        {
            return Err(ModelError::Validation {
                message: format!("Invalid image URL format: {image_url}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(NewsItem {
            id,
            title,
            excerpt: self.excerpt.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            image_url,
            published_at,
            source: self.source.unwrap_or_default(),
        })
    }
}
