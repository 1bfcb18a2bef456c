//! Cross-origin and cache-busting header injection
//!
//! Every response leaving the server passes through [`inject_headers`], so a
//! page loaded from any origin can fetch from the dev server and browsers
//! never serve a stale copy.

use hyper::header::{
    HeaderMap, HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL,
};

/// Headers added to every response, in the order they are written
pub static INJECTED_HEADERS: [(HeaderName, &str); 4] = [
    (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
    (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    (CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
];

/// Insert the injected headers, replacing any value a handler already set
pub fn inject_headers(headers: &mut HeaderMap) {
    for (name, value) in &INJECTED_HEADERS {
        headers.insert(name.clone(), HeaderValue::from_static(value));
    }
}
