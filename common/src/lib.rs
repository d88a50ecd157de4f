//! Shared building blocks for the news gateway.
//!
//! Everything here is free of HTTP and domain logic so that every other
//! crate can depend on it without pulling in the network stack.
//!
//! ## Architecture
//!
//! - **common** (this crate): error locations, status codes, secret handling
//! - **models**: news data structures and the response envelope
//! - **news-core**: gateway, fallback search, cache policy, orchestration
//! - **newsgate**: axum server wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_token;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;

#[cfg(test)]
mod tests;
