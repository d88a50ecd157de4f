//! User-facing strings. The UI distinguishes outcomes by these, not by status.

pub const ANONYMOUS_UPSELL_MESSAGE: &str = "Log in to get news personalized for you.";
pub const AUTHENTICATED_DEGRADED_MESSAGE: &str =
    "Personalized news is temporarily unavailable. Showing featured news instead.";
pub const ANONYMOUS_DEGRADED_MESSAGE: &str =
    "The news service is temporarily unavailable. Showing featured news.";
pub const NO_RESULTS_MESSAGE: &str = "No news matched your keywords. Try different keywords.";
pub const FAULT_ERROR: &str = "Search failed due to an internal error";
pub const FAULT_MESSAGE: &str = "Something went wrong. Showing featured news.";

pub fn local_results_message(count: usize) -> String {
    format!("Found {count} news items matching your keywords.")
}
