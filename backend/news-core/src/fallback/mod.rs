//! Local keyword search over the fallback corpus.
//!
//! Used when the upstream search is disabled or unreachable, and as the
//! static content behind every degraded response.

pub mod corpus;

use crate::error::config::ConfigError;

use models::{NewsItem, SearchQuery};

use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};

#[derive(Debug, Clone)]
pub struct LocalSearchFallbackEngine {
    corpus: Arc<[NewsItem]>,
}

impl LocalSearchFallbackEngine {
    /// Engine over a caller-supplied corpus.
    pub fn new(corpus: Vec<NewsItem>) -> Self {
        Self {
            corpus: corpus.into(),
        }
    }

    /// Engine over the corpus compiled into the binary.
    pub fn bundled() -> Self {
        Self {
            corpus: corpus::bundled_corpus(),
        }
    }

    /// Engine over a JSON corpus file, or the bundled corpus if the file is
    /// unusable. A broken file never leaves the gateway without fallback content.
    pub fn from_file_or_bundled(path: &Path) -> Self {
        match corpus::load_corpus_file(path) {
            Ok(items) => Self::new(items),
            Err(e) => {
                warn!("Using bundled fallback corpus: {e}");
                Self::bundled()
            }
        }
    }

    /// Resolve the corpus from an optional configured path.
    pub fn from_config_path(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::from_file_or_bundled(p),
            None => Self::bundled(),
        }
    }

    /// Strict variant of [`Self::from_file_or_bundled`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        corpus::load_corpus_file(path).map(Self::new)
    }

    /// The full corpus, in its stored order.
    pub fn corpus(&self) -> &[NewsItem] {
        &self.corpus
    }

    pub fn corpus_vec(&self) -> Vec<NewsItem> {
        self.corpus.to_vec()
    }

    /// Items where any keyword is a case-insensitive substring of the title or
    /// excerpt. Corpus order is preserved, so repeated runs agree.
    pub fn search(&self, query: &SearchQuery) -> Vec<NewsItem> {
        let needles = query.needles();

        let matches: Vec<NewsItem> = self
            .corpus
            .iter()
            .filter(|item| needles.iter().any(|needle| item.mentions(needle)))
            .cloned()
            .collect();

        debug!(
            "Local search for {:?} matched {} of {} items",
            query.keywords(),
            matches.len(),
            self.corpus.len()
        );
        matches
    }
}
