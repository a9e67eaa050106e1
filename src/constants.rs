//! Shared constants used across the application.

/// User agent sent with every API request unless overridden by configuration.
pub const DEFAULT_USER_AGENT: &str = concat!("yells-client/", env!("CARGO_PKG_VERSION"));

/// Body the backend returns (as text or a JSON string) when an item does not exist.
pub const NOT_FOUND_SENTINEL: &str = "404";

/// Alternate not-found body used by some revisions of the backend.
pub const UNKNOWN_SENTINEL: &str = "unknown";

/// Message sent over the search socket to request the next page of results.
pub const NEXT_PAGE_MESSAGE: &str = "next";

/// Banner text shown once a feed or search has nothing left to load.
pub const NO_MORE_RESULTS: &str = "No more results";

/// Notice revealed when a feed is still loading after the slow-warning delay.
pub const SLOW_WARNING: &str = "This is taking a while...";

/// Placeholder for a detail page item (or its comments) that failed to load.
pub const DETAIL_PLACEHOLDER: &str = "Could not load this right now.";

/// Placeholder for a home page slot that failed to load.
pub const HOME_PLACEHOLDER: &str = "Could not load this post right now.";
