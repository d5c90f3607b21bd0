mod parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use parser::{config_file_path, load_config, load_config_from};

use crate::constants::{APP_DIR_NAME, DEFAULT_SESSION_PREFIX, DEFAULT_WORKER_COMMAND};
use once_cell::sync::Lazy;

/// Default database location under the platform data directory
static DEFAULT_DB_PATH: Lazy<PathBuf> = Lazy::new(|| {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join("tasks.db")
});

/// Main configuration structure for the tool
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Worker process configuration
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Terminal session configuration
    #[serde(default)]
    pub session: SessionConfig,
}

/// Configuration for the external worker process
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WorkerConfig {
    /// Program to launch for each supervised run
    #[serde(default = "default_worker_command")]
    pub command: String,
    /// Extra arguments passed to the worker program
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        WorkerConfig {
            command: default_worker_command(),
            args: Vec::new(),
        }
    }
}

fn default_worker_command() -> String {
    DEFAULT_WORKER_COMMAND.to_string()
}

/// Configuration for the task database
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// Optional explicit database file path
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl DatabaseConfig {
    /// The configured path, or the platform default next to other app data
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| DEFAULT_DB_PATH.clone())
    }
}

/// Configuration for the terminal session bookkeeping
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionConfig {
    /// Close the hosting session tab after a successful run
    #[serde(default)]
    pub auto_close: bool,
    /// Prefix for derived session names
    #[serde(default = "default_session_prefix")]
    pub prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            auto_close: false,
            prefix: default_session_prefix(),
        }
    }
}

fn default_session_prefix() -> String {
    DEFAULT_SESSION_PREFIX.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.worker.command, "claude");
        assert!(config.worker.args.is_empty());
        assert!(!config.session.auto_close);
        assert_eq!(config.session.prefix, "taskherd");
        assert!(config.database.path.is_none());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config: Config = toml::from_str(
            "[worker]\ncommand = \"my-agent\"\nargs = [\"--yes\"]\n\n[session]\nauto_close = true\n",
        )
        .unwrap();
        assert_eq!(config.worker.command, "my-agent");
        assert_eq!(config.worker.args, vec!["--yes".to_string()]);
        assert!(config.session.auto_close);
        assert_eq!(config.session.prefix, "taskherd");
    }
}
