use super::Config;
use crate::constants::APP_DIR_NAME;
use crate::errors::Error;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Location of the configuration file under the platform config directory
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join("config.toml")
}

/// Loads the tool configuration from the default location
///
/// A missing file is not an error; every field has a default.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed
pub fn load_config() -> Result<Config, Error> {
    load_config_from(&config_file_path())
}

/// Loads and parses a configuration from a TOML file
///
/// # Arguments
///
/// * `file_path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// * The file exists but cannot be read
/// * The TOML content cannot be parsed into a Config
pub fn load_config_from(file_path: &Path) -> Result<Config, Error> {
    if !file_path.exists() {
        debug!(
            "No configuration file at {}, using defaults",
            file_path.display()
        );
        return Ok(Config::default());
    }

    let toml_str = fs::read_to_string(file_path)?;
    let config: Config = toml::from_str(&toml_str)
        .map_err(|e| Error::Config(format!("{}: {}", file_path.display(), e)))?;
    debug!("Loaded configuration from {}", file_path.display());
    Ok(config)
}
