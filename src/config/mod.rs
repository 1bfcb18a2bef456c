// Configuration module entry point
// Loads the immutable server configuration and the per-process state built from it

mod state;
mod types;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, ServerConfig};

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "devserve.toml";

impl Config {
    /// Load configuration from `devserve.toml` and `DEVSERVE_*` variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from an exact TOML file path
    ///
    /// The name is never completed with an extension, so a `devserve`
    /// binary sitting next to `devserve.toml` cannot shadow it.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(config_path, environment())
    }

    fn load_with_env(
        config_path: &str,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::new(config_path, config::FileFormat::Toml).required(false))
            .add_source(env)
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.access_log_format", "dev")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Resolve the served directory to a canonical absolute path
    ///
    /// Falls back to the directory containing the running executable when
    /// `server.root` is not set.
    pub fn resolve_root(&self) -> Result<PathBuf, String> {
        let root = match self.server.root.as_deref() {
            Some(dir) => PathBuf::from(dir),
            None => executable_dir()?,
        };

        let canonical = root
            .canonicalize()
            .map_err(|e| format!("Invalid root directory '{}': {e}", root.display()))?;
        if !canonical.is_dir() {
            return Err(format!(
                "Root '{}' is not a directory",
                canonical.display()
            ));
        }
        Ok(canonical)
    }
}

/// `DEVSERVE_SERVER__PORT=9000`, `DEVSERVE_HTTP__INDEX_FILES=index.html,home.html`
fn environment() -> config::Environment {
    config::Environment::with_prefix("DEVSERVE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("http.index_files")
}

fn executable_dir() -> Result<PathBuf, String> {
    let exe = std::env::current_exe().map_err(|e| format!("Cannot locate executable: {e}"))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| format!("Executable '{}' has no parent directory", exe.display()))
}
