//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{WeftConfig, MAX_INDENT};
use std::path::Path;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "weft.toml";

/// Loads and validates `<dir>/weft.toml`.
///
/// A directory without the file yields the default configuration.
pub fn load_config(dir: &Path) -> Result<WeftConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(WeftConfig::default());
    }
    load_config_file(&config_path)
}

/// Loads and validates the configuration file at `path`, which must exist.
pub fn load_config_file(path: &Path) -> Result<WeftConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `weft.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<WeftConfig, ConfigError> {
    let config: WeftConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &WeftConfig) -> Result<(), ConfigError> {
    if config.save.indent > MAX_INDENT {
        return Err(ConfigError::ValidationError(format!(
            "save.indent must be at most {MAX_INDENT}, found {}",
            config.save.indent
        )));
    }
    Ok(())
}
