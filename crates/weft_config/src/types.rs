//! Configuration types deserialized from `weft.toml`.

use serde::Deserialize;

/// The top-level configuration parsed from `weft.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeftConfig {
    /// Settings for reading design documents.
    #[serde(default)]
    pub load: LoadConfig,
    /// Settings for writing design documents.
    #[serde(default)]
    pub save: SaveConfig,
}

/// Settings applied when loading a design.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadConfig {
    /// Fail when an instance's `config` has keys its module does not declare.
    #[serde(default)]
    pub reject_unknown_config_keys: bool,
}

/// Settings applied when saving a design.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveConfig {
    /// Spaces per indentation level; `0` writes compact JSON.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

/// Largest accepted `save.indent`.
pub const MAX_INDENT: usize = 16;

fn default_indent() -> usize {
    2
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
        }
    }
}
