// Connection handling module
// Serves a single accepted TCP connection

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config;
use crate::handler;
use crate::logger::{self, AccessLogEntry};

/// Handle a single connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Serves HTTP/1.1 with keep-alive using the request handler
/// 3. Logs connection-level failures; a request hyper refuses as
///    malformed still gets its one access-log record
///
/// A failing connection never affects the accept loop or other connections.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address, recorded in the access log
/// * `state` - Shared application state
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<config::AppState>,
) {
    let state = Arc::clone(state);

    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service_state = Arc::clone(&state);
        let service = service_fn(move |req| {
            handler::handle_request(req, Arc::clone(&service_state), peer_addr)
        });

        let conn = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(io, service);

        if let Err(err) = conn.await {
            if err.is_parse() {
                // hyper already answered with its own error response
                let status = if err.is_parse_too_large() { 431 } else { 400 };
                state
                    .access_log
                    .record(&AccessLogEntry::rejected(peer_addr.to_string(), status));
            } else if !err.is_incomplete_message() {
                // Clients closing mid-request is routine for browsers
                logger::log_connection_error(&err);
            }
        }
    });
}
