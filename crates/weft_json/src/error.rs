//! Error types for document loading and saving.

use std::path::PathBuf;
use weft_diagnostics::{Diagnostic, DiagnosticCode};
use weft_ir::IrError;

/// Errors that can occur while decoding or writing a document.
///
/// Every variant maps to one [`DiagnosticCode`]; at the public file API these
/// errors are reported through a diagnostic sink rather than returned.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The source or destination file could not be opened, read, or written.
    #[error("Cannot open file {}: {source}", path.display())]
    Io {
        /// The file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The source text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// A namespace or instantiable name did not resolve, or was declared twice.
    #[error("{0}")]
    Symbol(String),

    /// A type node was malformed or named an unknown kind.
    #[error("{0}")]
    Type(String),

    /// A parameter declaration was malformed.
    #[error("{0}")]
    Param(String),

    /// A bound argument was missing, extraneous, or of the wrong shape.
    #[error("{0}")]
    Arg(String),

    /// The document or the graph it describes had the wrong shape.
    #[error("{0}")]
    Structural(String),

    /// The document uses a feature that is not implemented.
    #[error("not implemented: {0}")]
    NotImplemented(String),
}

impl CodecError {
    /// Returns the diagnostic code for this error.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            CodecError::Io { .. } => DiagnosticCode::IO,
            CodecError::Syntax(_) | CodecError::Structural(_) => DiagnosticCode::STRUCTURAL,
            CodecError::Symbol(_) => DiagnosticCode::SYMBOL,
            CodecError::Type(_) => DiagnosticCode::TYPE,
            CodecError::Param(_) => DiagnosticCode::PARAM,
            CodecError::Arg(_) => DiagnosticCode::ARG,
            CodecError::NotImplemented(_) => DiagnosticCode::NOT_IMPLEMENTED,
        }
    }

    /// Converts this error into a fatal diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code(), self.to_string())
    }
}

impl From<IrError> for CodecError {
    fn from(err: IrError) -> Self {
        let message = err.to_string();
        match err {
            IrError::MissingSymbol { .. } | IrError::DuplicateSymbol { .. } => {
                CodecError::Symbol(message)
            }
            IrError::DuplicateField { .. } => CodecError::Type(message),
            IrError::MissingArg { .. }
            | IrError::UnexpectedArg { .. }
            | IrError::ArgKindMismatch { .. } => CodecError::Arg(message),
            IrError::DuplicateInstance { .. }
            | IrError::ReservedInstanceName { .. }
            | IrError::EmptyWirePath
            | IrError::UnknownInstance { .. }
            | IrError::WrongInstantiableKind { .. }
            | IrError::DefinitionMismatch { .. } => CodecError::Structural(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_diagnostics::Severity;

    #[test]
    fn io_error_display() {
        let err = CodecError::Io {
            path: PathBuf::from("/nonexistent/top.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Cannot open file /nonexistent/top.json"));
        assert_eq!(err.code(), DiagnosticCode::IO);
    }

    #[test]
    fn ir_errors_map_to_kinds() {
        let missing: CodecError = IrError::MissingSymbol {
            namespace: "global".into(),
            name: "foo".into(),
        }
        .into();
        assert!(matches!(missing, CodecError::Symbol(_)));
        assert_eq!(missing.to_string(), "Missing Symbol: global.foo");

        let dup: CodecError = IrError::DuplicateField {
            field: "x".into(),
        }
        .into();
        assert_eq!(dup.code(), DiagnosticCode::TYPE);

        let unknown: CodecError = IrError::UnknownInstance {
            module: "global.top".into(),
            instance: "c".into(),
        }
        .into();
        assert_eq!(unknown.code(), DiagnosticCode::STRUCTURAL);
    }

    #[test]
    fn diagnostic_is_fatal() {
        let diag = CodecError::NotImplemented("generator instances".into()).to_diagnostic();
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.code, DiagnosticCode::NOT_IMPLEMENTED);
        assert_eq!(diag.message, "not implemented: generator instances");
    }
}
