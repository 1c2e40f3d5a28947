//! Parsing and validation of `weft.toml` configuration files.
//!
//! The configuration tunes how designs are loaded and saved. Every setting
//! has a default, so a missing file or an empty table is valid.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
