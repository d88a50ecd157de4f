//! `Cache-Control` selection per response class.
//!
//! Personalized payloads are per-user and stay `private`. Anonymous and
//! fallback payloads are identical for everyone, so shared caches may hold
//! them, with `stale-while-revalidate` to ride out upstream hiccups.

/// Which kind of response is being sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Personalized upstream feed for a logged-in user.
    AuthedSuccess,
    /// Latest upstream feed for an anonymous visitor.
    AnonSuccess,
    /// Static corpus or an empty local search result.
    Fallback,
    /// Upstream search results.
    SearchSuccess,
    /// Local search over the corpus that found matches.
    SearchFallback,
    /// Validation failures and internal faults.
    Uncacheable,
}

pub const AUTHED_SUCCESS_CACHE_CONTROL: &str = "private, max-age=60";
pub const ANON_SUCCESS_CACHE_CONTROL: &str = "public, s-maxage=300, stale-while-revalidate=600";
pub const FALLBACK_CACHE_CONTROL: &str = "public, s-maxage=60, stale-while-revalidate=120";
pub const SEARCH_SUCCESS_CACHE_CONTROL: &str = "public, max-age=60";
pub const SEARCH_FALLBACK_CACHE_CONTROL: &str = "public, s-maxage=300, stale-while-revalidate=600";
pub const UNCACHEABLE_CACHE_CONTROL: &str = "no-store";

/// Header value for `outcome`. Pure and deterministic.
pub const fn cache_control(outcome: CacheOutcome) -> &'static str {
    match outcome {
        CacheOutcome::AuthedSuccess => AUTHED_SUCCESS_CACHE_CONTROL,
        CacheOutcome::AnonSuccess => ANON_SUCCESS_CACHE_CONTROL,
        CacheOutcome::Fallback => FALLBACK_CACHE_CONTROL,
        CacheOutcome::SearchSuccess => SEARCH_SUCCESS_CACHE_CONTROL,
        CacheOutcome::SearchFallback => SEARCH_FALLBACK_CACHE_CONTROL,
        CacheOutcome::Uncacheable => UNCACHEABLE_CACHE_CONTROL,
    }
}
