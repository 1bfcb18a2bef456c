//! Access log format module
//!
//! Two kinds of format are understood:
//! - `dev` (bracketed local timestamp, one line per request; the default)
//! - any other string is a pattern with `$variable` placeholders

use chrono::Local;

/// Timestamp layout used by the `dev` format, e.g. `15/Oct/2026 14:03:22`
const DEV_TIME_FORMAT: &str = "%d/%b/%Y %H:%M:%S";

/// Access log entry containing all request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client address (`ip:port`)
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method, empty when the request line could not be parsed
    pub method: String,
    /// Request URI path, still percent-encoded
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// HTTP version (1.0, 1.1)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            request_time_us: 0,
        }
    }

    /// Entry for a request the HTTP layer refused before it reached a handler
    pub fn rejected(remote_addr: String, status: u16) -> Self {
        let mut entry = Self::new(remote_addr, String::new(), String::new());
        entry.status = status;
        entry
    }

    /// Render the entry: `dev` or a `$variable` pattern
    pub fn format(&self, format: &str) -> String {
        match format {
            "dev" => self.format_dev(),
            pattern => self.format_pattern(pattern),
        }
    }

    fn request_uri(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{q}", self.path),
            None => self.path.clone(),
        }
    }

    /// Request line as it appeared on the wire, `-` if there was none
    pub fn request_line(&self) -> String {
        if self.method.is_empty() {
            return "-".to_string();
        }
        format!(
            "{} {} HTTP/{}",
            self.method,
            self.request_uri(),
            self.http_version
        )
    }

    /// `[15/Oct/2026 14:03:22] 127.0.0.1:52144 "GET / HTTP/1.1" 200 12`
    fn format_dev(&self) -> String {
        format!(
            "[{}] {} \"{}\" {} {}",
            self.time.format(DEV_TIME_FORMAT),
            self.remote_addr,
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    /// Substitute `$name` placeholders; unknown names are copied through
    ///
    /// Variables: `$remote_addr`, `$time_dev`, `$time_iso8601`, `$request`,
    /// `$request_method`, `$request_uri`, `$status`, `$body_bytes_sent`,
    /// `$request_time` (seconds, 3 decimals).
    fn format_pattern(&self, pattern: &str) -> String {
        let mut out = String::with_capacity(pattern.len() + 64);
        let mut rest = pattern;

        while let Some(dollar) = rest.find('$') {
            out.push_str(&rest[..dollar]);
            let after = &rest[dollar + 1..];
            let len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            let name = &after[..len];

            match self.variable(name) {
                Some(value) => out.push_str(&value),
                None => {
                    out.push('$');
                    out.push_str(name);
                }
            }
            rest = &after[len..];
        }

        out.push_str(rest);
        out
    }

    fn variable(&self, name: &str) -> Option<String> {
        let value = match name {
            "remote_addr" => self.remote_addr.clone(),
            "time_dev" => self.time.format(DEV_TIME_FORMAT).to_string(),
            "time_iso8601" => self.time.to_rfc3339(),
            "request" => self.request_line(),
            "request_method" => self.method.clone(),
            "request_uri" => self.request_uri(),
            "status" => self.status.to_string(),
            "body_bytes_sent" => self.body_bytes.to_string(),
            "request_time" => format!(
                "{}.{:03}",
                self.request_time_us / 1_000_000,
                (self.request_time_us % 1_000_000) / 1_000
            ),
            _ => return None,
        };
        Some(value)
    }
}
