//! Logger module
//!
//! Provides logging utilities for the development server including:
//! - Startup banner and shutdown messages
//! - Per-request access logging through the [`AccessLog`] callback
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;
use std::path::Path;

/// Callback invoked once for every completed request
pub trait AccessLog: Send + Sync {
    fn record(&self, entry: &AccessLogEntry);
}

/// Renders each entry with a configured format and writes it to the access log
pub struct FormattedAccessLog {
    format: String,
}

impl FormattedAccessLog {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl AccessLog for FormattedAccessLog {
    fn record(&self, entry: &AccessLogEntry) {
        write_access(&entry.format(&self.format));
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log (lifecycle messages share it)
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, root: &Path, config: &Config) {
    let url_host = if addr.ip().is_unspecified() {
        "localhost".to_string()
    } else {
        addr.ip().to_string()
    };

    write_access("============================================================");
    write_access("Web App Development Server");
    write_access("============================================================");
    write_access(&format!("Server running at: http://{url_host}:{}", addr.port()));
    write_access(&format!("Listening on: {addr}"));
    write_access(&format!("Serving directory: {}", root.display()));
    write_access(&format!("Access log format: {}", config.logging.access_log_format));
    if let Some(ref path) = config.logging.access_log_file {
        write_access(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_access(&format!("Error log: {path}"));
    }
    write_access("");
    write_access("IMPORTANT:");
    write_access("  - This is for LOCAL TESTING ONLY");
    write_access("  - Every response allows any origin and disables caching");
    write_access("  - Serve over HTTPS (tunnel or static host) before sharing the app");
    write_access("");
    write_access("Press Ctrl+C to stop the server");
    write_access("============================================================\n");
}

pub fn log_shutdown() {
    write_access("\nServer stopped");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_signal(name: &str) {
    write_access(&format!("\n[SIGNAL] {name} received, shutting down..."));
}

pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    log_error(&format!("Failed to bind {addr}: {err}"));
    if err.kind() == std::io::ErrorKind::AddrInUse {
        write_error("        Is another server already running on this port?");
    }
}
