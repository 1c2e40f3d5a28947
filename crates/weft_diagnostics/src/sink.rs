//! Where loads and saves report what went wrong.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::cell::{Cell, RefCell};

/// Collects the diagnostics of one or more loads and saves.
///
/// A context is driven by one caller at a time, so the sink is a plain
/// single-threaded accumulator: operations borrow it, the caller drains it
/// afterwards. Counts are kept separately so they survive [`take_all`].
///
/// [`take_all`]: DiagnosticSink::take_all
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
    errors: Cell<usize>,
    warnings: Cell<usize>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        let counter = match diag.severity {
            Severity::Error => &self.errors,
            Severity::Warning => &self.warnings,
        };
        counter.set(counter.get() + 1);
        self.diagnostics.borrow_mut().push(diag);
    }

    /// Returns `true` once any fatal diagnostic was recorded.
    pub fn has_errors(&self) -> bool {
        self.errors.get() > 0
    }

    /// Number of fatal diagnostics recorded so far.
    pub fn error_count(&self) -> usize {
        self.errors.get()
    }

    /// Number of warnings recorded so far.
    pub fn warning_count(&self) -> usize {
        self.warnings.get()
    }

    /// Drains the recorded diagnostics in emission order.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }
}
