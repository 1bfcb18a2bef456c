//! Request dispatch module
//!
//! Entry point for HTTP request processing: method dispatch, header
//! injection, and the access-log callback.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::AccessLogEntry;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, SERVER};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    /// Raw (still percent-encoded) URI path
    pub path: String,
    pub query: Option<String>,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
    pub has_if_none_match: bool,
}

impl RequestContext {
    pub fn from_request<B>(req: &Request<B>) -> Self {
        Self {
            method: req.method().clone(),
            path: req.uri().path().to_string(),
            query: req.uri().query().map(ToString::to_string),
            is_head: *req.method() == Method::HEAD,
            if_modified_since: header_string(req, "if-modified-since"),
            has_if_none_match: req.headers().contains_key("if-none-match"),
        }
    }
}

/// Main entry point for HTTP request handling
///
/// Every response gets the injected cross-origin headers, and exactly one
/// access-log record is emitted once the status is known.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let ctx = RequestContext::from_request(&req);

    let mut entry = AccessLogEntry::new(
        peer_addr.to_string(),
        ctx.method.to_string(),
        ctx.path.clone(),
    );
    entry.query.clone_from(&ctx.query);
    entry.http_version = version_label(req.version()).to_string();

    let mut response = dispatch(&ctx, &state).await;
    finalize_headers(&mut response, &state.config.http.server_name);

    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    state.access_log.record(&entry);

    Ok(response)
}

/// Dispatch on HTTP method
async fn dispatch(ctx: &RequestContext, state: &AppState) -> Response<Full<Bytes>> {
    match ctx.method {
        Method::OPTIONS => http::build_options_response(),
        Method::GET | Method::HEAD => static_files::serve(ctx, state).await,
        _ => http::build_501_response(),
    }
}

/// Apply the headers every response carries
fn finalize_headers(response: &mut Response<Full<Bytes>>, server_name: &str) {
    let headers = response.headers_mut();
    http::inject_headers(headers);
    if let Ok(value) = HeaderValue::from_str(server_name) {
        headers.insert(SERVER, value);
    }
}

fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

#[allow(clippy::missing_const_for_fn)]
fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testing::{test_state, RecordingLog, TestRoot};
    use http_body_util::BodyExt;

    fn request(method: Method, uri: &str) -> Request<()> {
        Request::builder().method(method).uri(uri).body(()).unwrap()
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:50000".parse().unwrap()
    }

    fn assert_injected(response: &Response<Full<Bytes>>) {
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        assert_eq!(headers["cache-control"], "no-store, no-cache, must-revalidate");
    }

    #[tokio::test]
    async fn test_get_index_html() {
        let root = TestRoot::new("router-get");
        let log = Arc::new(RecordingLog::default());
        let state = test_state(&root, Box::new(Arc::clone(&log)));

        let response = handle_request(request(Method::GET, "/index.html"), state, peer())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "text/html");
        assert_eq!(response.headers()["content-length"], "12");
        assert!(response.headers().contains_key("last-modified"));
        assert!(response.headers()["server"].to_str().unwrap().starts_with("devserve/"));
        assert_injected(&response);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"<h1>Hi</h1>\n");
    }

    #[tokio::test]
    async fn test_options_any_path() {
        let root = TestRoot::new("router-options");
        let log = Arc::new(RecordingLog::default());
        let state = test_state(&root, Box::new(Arc::clone(&log)));

        let response = handle_request(request(Method::OPTIONS, "/anything"), state, peer())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_injected(&response);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_still_injected() {
        let root = TestRoot::new("router-missing");
        let log = Arc::new(RecordingLog::default());
        let state = test_state(&root, Box::new(Arc::clone(&log)));

        let response = handle_request(request(Method::GET, "/missing.txt"), state, peer())
            .await
            .unwrap();

        assert_eq!(response.status(), 404);
        assert_injected(&response);
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let root = TestRoot::new("router-post");
        let log = Arc::new(RecordingLog::default());
        let state = test_state(&root, Box::new(Arc::clone(&log)));

        let response = handle_request(request(Method::POST, "/index.html"), state, peer())
            .await
            .unwrap();

        assert_eq!(response.status(), 501);
        assert_injected(&response);
    }

    #[tokio::test]
    async fn test_one_log_record_per_request() {
        let root = TestRoot::new("router-log");
        let log = Arc::new(RecordingLog::default());
        let state = test_state(&root, Box::new(Arc::clone(&log)));

        for (method, uri) in [
            (Method::GET, "/index.html?v=2"),
            (Method::GET, "/nope"),
            (Method::DELETE, "/index.html"),
        ] {
            handle_request(request(method, uri), Arc::clone(&state), peer())
                .await
                .unwrap();
        }

        let entries = log.entries.lock().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].method, "GET");
        assert_eq!(entries[0].path, "/index.html");
        assert_eq!(entries[0].query.as_deref(), Some("v=2"));
        assert_eq!(entries[0].status, 200);
        assert_eq!(entries[0].body_bytes, 12);
        assert_eq!(entries[0].remote_addr, "127.0.0.1:50000");
        assert_eq!(entries[1].status, 404);
        assert_eq!(entries[2].method, "DELETE");
        assert_eq!(entries[2].status, 501);
    }
}
