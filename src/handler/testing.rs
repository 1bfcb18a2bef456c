//! Shared fixtures for handler tests

use crate::config::{AppState, Config, HttpConfig, LoggingConfig, ServerConfig};
use crate::logger::{AccessLog, AccessLogEntry};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Access log that keeps every entry in memory
#[derive(Default)]
pub struct RecordingLog {
    pub entries: Mutex<Vec<AccessLogEntry>>,
}

impl AccessLog for Arc<RecordingLog> {
    fn record(&self, entry: &AccessLogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

/// Temporary document root holding `index.html` = `<h1>Hi</h1>\n`
pub struct TestRoot(pub PathBuf);

impl TestRoot {
    pub fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("devserve-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<h1>Hi</h1>\n").unwrap();
        Self(dir.canonicalize().unwrap())
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.0.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.0.join(relative);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TestRoot {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

pub fn test_state_with(root: &TestRoot, http: HttpConfig, log: Box<dyn AccessLog>) -> Arc<AppState> {
    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            root: Some(root.path().display().to_string()),
        },
        logging: LoggingConfig {
            access_log_format: "dev".to_string(),
            access_log_file: None,
            error_log_file: None,
        },
        http,
    };
    Arc::new(AppState::new(config, root.path().to_path_buf(), log))
}

pub fn test_state(root: &TestRoot, log: Box<dyn AccessLog>) -> Arc<AppState> {
    test_state_with(root, HttpConfig::default(), log)
}
