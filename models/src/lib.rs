//! Domain models for the news gateway.
//!
//! Pure data structures: news items, the search query, identity state and
//! the response envelope every endpoint returns. Models carry validation but
//! no I/O - the gateway only selects and filters them, never mutates them.

pub mod envelope;
pub mod error;
pub mod identity;
pub mod keyword;
pub mod news_item;
pub mod search_query;

pub use common::ErrorLocation;
pub use envelope::{EnvelopeData, KeywordListData, ResponseEnvelope};
pub use error::model_error::ModelError;
pub use identity::IdentityState;
pub use keyword::KeywordSubscription;
pub use news_item::NewsItem;
pub use news_item::builder::NewsItemBuilder;
pub use search_query::{MAX_KEYWORDS, SearchQuery};

#[cfg(test)]
mod tests;
