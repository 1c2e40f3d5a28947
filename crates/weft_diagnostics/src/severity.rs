//! Diagnostic severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How bad a diagnostic is.
///
/// A `Warning` reports something a load tolerated, such as a config key the
/// referenced module never declared. An `Error` is fatal: the load or save
/// that emitted it produced nothing.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// Tolerated; the operation still succeeded.
    Warning,
    /// Fatal; the operation was rejected.
    Error,
}

impl Severity {
    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}
