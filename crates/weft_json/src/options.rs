//! Knobs for loading and saving documents.

/// Options controlling how documents are decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject `config` entries that the referenced instantiable does not declare.
    ///
    /// Off by default: extraneous keys are ignored, while missing keys are
    /// always an error.
    pub reject_unknown_config_keys: bool,
}

/// Options controlling how documents are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Spaces per indentation level; `0` writes compact single-line JSON.
    pub indent: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}
