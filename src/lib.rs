//! Local development static file server
//!
//! Serves a directory over HTTP with permissive cross-origin headers,
//! cache-busting headers on every response, and one access-log line per
//! request.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
