//! Errors raised while building or querying the module graph.

use crate::param::ParamKind;

/// Errors that can occur when declaring, resolving, or defining IR entities.
///
/// Names are carried as resolved strings so the error can outlive the
/// context that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    /// A namespace or name did not resolve to an instantiable.
    #[error("Missing Symbol: {namespace}.{name}")]
    MissingSymbol {
        /// The namespace that was searched.
        namespace: String,
        /// The instantiable name that was looked up.
        name: String,
    },

    /// A module or generator with this name already exists in the namespace.
    #[error("symbol {namespace}.{name} is already declared")]
    DuplicateSymbol {
        /// The namespace the declaration targeted.
        namespace: String,
        /// The conflicting name.
        name: String,
    },

    /// A record type declared the same field twice.
    #[error("duplicate record field '{field}'")]
    DuplicateField {
        /// The repeated field name.
        field: String,
    },

    /// An instance with this name already exists in the definition.
    #[error("duplicate instance '{name}' in definition of {module}")]
    DuplicateInstance {
        /// The qualified name of the module being defined.
        module: String,
        /// The repeated instance name.
        name: String,
    },

    /// An instance used a name reserved for the module's own interface.
    #[error("instance name '{name}' is reserved")]
    ReservedInstanceName {
        /// The reserved name.
        name: String,
    },

    /// A wire path had an empty instance name.
    #[error("wire path has an empty instance name")]
    EmptyWirePath,

    /// A wire path named an instance that does not exist in the definition.
    #[error("connection in {module} references unknown instance '{instance}'")]
    UnknownInstance {
        /// The qualified name of the module being defined.
        module: String,
        /// The unresolved instance name.
        instance: String,
    },

    /// A parameter declared on the referenced instantiable had no bound argument.
    #[error("missing argument '{name}' for {target}")]
    MissingArg {
        /// The qualified name of the referenced instantiable.
        target: String,
        /// The parameter name.
        name: String,
    },

    /// An argument was bound that the referenced instantiable does not declare.
    #[error("unexpected argument '{name}' for {target}")]
    UnexpectedArg {
        /// The qualified name of the referenced instantiable.
        target: String,
        /// The argument name.
        name: String,
    },

    /// An argument's kind did not match its declared parameter kind.
    #[error("argument '{name}' for {target} must be {expected}, found {found}")]
    ArgKindMismatch {
        /// The qualified name of the referenced instantiable.
        target: String,
        /// The argument name.
        name: String,
        /// The declared parameter kind.
        expected: ParamKind,
        /// The kind of the bound argument.
        found: ParamKind,
    },

    /// A module was required but the symbol names a generator, or vice versa.
    #[error("{name} is not a {expected}")]
    WrongInstantiableKind {
        /// The qualified name of the symbol.
        name: String,
        /// `"module"` or `"generator"`.
        expected: &'static str,
    },

    /// A definition was attached to a module that already has one, or to the
    /// wrong module.
    #[error("cannot attach definition to {module}: {reason}")]
    DefinitionMismatch {
        /// The qualified name of the target module.
        module: String,
        /// Why the attach was refused.
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_symbol_message() {
        let err = IrError::MissingSymbol {
            namespace: "global".to_string(),
            name: "adder".to_string(),
        };
        assert_eq!(err.to_string(), "Missing Symbol: global.adder");
    }

    #[test]
    fn kind_mismatch_message() {
        let err = IrError::ArgKindMismatch {
            target: "global.reg".to_string(),
            name: "width".to_string(),
            expected: ParamKind::Int,
            found: ParamKind::String,
        };
        assert_eq!(
            err.to_string(),
            "argument 'width' for global.reg must be Int, found String"
        );
    }

    #[test]
    fn unknown_instance_message() {
        let err = IrError::UnknownInstance {
            module: "global.top".to_string(),
            instance: "c".to_string(),
        };
        assert!(err.to_string().contains("unknown instance 'c'"));
    }
}
