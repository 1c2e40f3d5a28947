//! Diagnostic codes with category prefixes for structured error identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Error diagnostics, prefixed with `E`.
    Error,
    /// Warning diagnostics, prefixed with `W`.
    Warning,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }
}

/// A structured diagnostic code combining a category prefix and a numeric identifier.
///
/// Displayed as the category prefix followed by a zero-padded 3-digit number,
/// e.g. `E002` for an unresolved symbol.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// A source or destination file could not be opened, read, or written.
    pub const IO: Self = Self::error(1);
    /// A namespace or instantiable name did not resolve.
    pub const SYMBOL: Self = Self::error(2);
    /// A type node was malformed or named an unknown kind.
    pub const TYPE: Self = Self::error(3);
    /// A parameter declaration was malformed.
    pub const PARAM: Self = Self::error(4);
    /// A bound argument was missing, extraneous, or of the wrong kind.
    pub const ARG: Self = Self::error(5);
    /// The document or graph had the wrong shape.
    pub const STRUCTURAL: Self = Self::error(6);
    /// The document requires a feature that is not implemented.
    pub const NOT_IMPLEMENTED: Self = Self::error(7);

    /// A lax load ignored a config key the referenced module does not declare.
    pub const UNKNOWN_CONFIG_KEY: Self = Self::warning(1);

    const fn error(number: u16) -> Self {
        Self {
            category: Category::Error,
            number,
        }
    }

    const fn warning(number: u16) -> Self {
        Self {
            category: Category::Warning,
            number,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
