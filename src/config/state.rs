// Application state module
// Read-only state shared by every connection task

use std::path::PathBuf;

use super::types::Config;
use crate::logger::AccessLog;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Canonical document root; every served path must stay below it
    pub root: PathBuf,
    /// Invoked once per completed request
    pub access_log: Box<dyn AccessLog>,
}

impl AppState {
    pub fn new(config: Config, root: PathBuf, access_log: Box<dyn AccessLog>) -> Self {
        Self {
            config,
            root,
            access_log,
        }
    }
}
