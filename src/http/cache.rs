//! HTTP conditional request module
//!
//! Provides `Last-Modified` formatting and `If-Modified-Since` evaluation.
//! Cache lifetime itself is pinned by the injected `Cache-Control` header, so
//! browsers revalidate on every load and get a cheap 304 when nothing changed.

use chrono::{DateTime, Utc};

/// IMF-fixdate layout, e.g. `Thu, 15 Oct 2026 12:03:22 GMT`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a timestamp as an HTTP date
pub fn format_http_date(time: DateTime<Utc>) -> String {
    time.format(HTTP_DATE_FORMAT).to_string()
}

/// Parse an HTTP date, returning `None` for anything malformed
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Check whether the client's copy is still current
///
/// `If-None-Match` takes precedence over `If-Modified-Since`; since no
/// entity tags are issued, its presence disables the date comparison.
///
/// # Arguments
/// * `if_modified_since` - Client-sent If-Modified-Since header
/// * `has_if_none_match` - Whether the client also sent If-None-Match
/// * `modified` - File modification time
///
/// # Returns
/// Returns true if a 304 should be sent
pub fn is_not_modified(
    if_modified_since: Option<&str>,
    has_if_none_match: bool,
    modified: DateTime<Utc>,
) -> bool {
    if has_if_none_match {
        return false;
    }
    if_modified_since
        .and_then(parse_http_date)
        // HTTP dates have whole-second resolution
        .is_some_and(|since| modified.timestamp() <= since.timestamp())
}
