pub mod builder;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single news article as shown in the feed.
///
/// Produced either by the upstream service or by the bundled fallback corpus.
/// Nothing downstream mutates an item; layers only select or filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    pub published_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
}

/// Optional text fields arrive as missing, `null` or a string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl NewsItem {
    /// True when `needle_lowercase` occurs in the title or the excerpt.
    ///
    /// The needle must already be lowercased; the item text is lowercased here.
    pub fn mentions(&self, needle_lowercase: &str) -> bool {
        self.title.to_lowercase().contains(needle_lowercase)
            || self.excerpt.to_lowercase().contains(needle_lowercase)
    }
}
