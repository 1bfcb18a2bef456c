//! HTTP response building module
//!
//! Provides builders for the status codes the development server emits.
//! Cross-origin headers are not set here; they are injected on the way out.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build file response; the body is dropped for HEAD but the length is kept
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    last_modified: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length);
    if let Some(date) = last_modified {
        builder = builder.header("Last-Modified", date);
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 301 redirect response (directory requested without trailing slash)
pub fn build_redirect_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(301)
        .header("Location", location)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 304 Not Modified response
pub fn build_304_response(last_modified: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("Last-Modified", last_modified)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 403 Forbidden response
pub fn build_403_response() -> Response<Full<Bytes>> {
    build_error_response(403, "403 Forbidden")
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_error_response(404, "404 Not Found")
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    build_error_response(500, "500 Internal Server Error")
}

/// Build 501 Not Implemented response for unsupported methods
pub fn build_501_response() -> Response<Full<Bytes>> {
    let mut response = build_error_response(501, "501 Not Implemented");
    response.headers_mut().insert(
        hyper::header::ALLOW,
        hyper::header::HeaderValue::from_static("GET, HEAD, OPTIONS"),
    );
    response
}

fn build_error_response(status: u16, message: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", message.len())
        .body(Full::new(Bytes::from_static(message.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error(message, &e);
            Response::new(Full::new(Bytes::from_static(message.as_bytes())))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::body::Body;

    fn body_len(response: &Response<Full<Bytes>>) -> Option<u64> {
        response.body().size_hint().exact()
    }

    #[test]
    fn test_head_keeps_content_length() {
        let response = build_file_response(
            Bytes::from_static(b"body { color: red }"),
            "text/css",
            None,
            true,
        );
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-length"], "19");
        assert_eq!(body_len(&response), Some(0));
    }

    #[test]
    fn test_file_response_last_modified() {
        let response = build_file_response(
            Bytes::from_static(b"{}"),
            "application/json",
            Some("Thu, 15 Oct 2026 12:03:22 GMT"),
            false,
        );
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(response.headers()["last-modified"], "Thu, 15 Oct 2026 12:03:22 GMT");
        assert_eq!(body_len(&response), Some(2));
    }

    #[test]
    fn test_error_responses() {
        assert_eq!(build_403_response().status(), 403);
        assert_eq!(build_404_response().status(), 404);
        assert_eq!(build_500_response().status(), 500);

        let not_implemented = build_501_response();
        assert_eq!(not_implemented.status(), 501);
        assert_eq!(not_implemented.headers()["allow"], "GET, HEAD, OPTIONS");
        assert_eq!(body_len(&not_implemented), Some(19));
    }

    #[test]
    fn test_options_response_is_empty() {
        let response = build_options_response();
        assert_eq!(response.status(), 200);
        assert_eq!(body_len(&response), Some(0));
    }
}
