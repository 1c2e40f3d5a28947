//! Configuration parameter kinds and bound argument values.
//!
//! An instantiable declares its configuration as [`Params`] (name → kind);
//! an instance binds [`Args`] (name → value) against them.

use crate::error::IrError;
use crate::ids::TypeId;
use crate::name_map::NameMap;
use std::fmt;
use weft_common::Interner;

/// The kind of a configuration parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// An integer value.
    Int,
    /// A string value.
    String,
    /// A type value.
    Type,
}

impl ParamKind {
    /// Returns the kind name used in documents.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::Int => "Int",
            ParamKind::String => "String",
            ParamKind::Type => "Type",
        }
    }

    /// Parses a kind name as written in documents.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Int" => Some(ParamKind::Int),
            "String" => Some(ParamKind::String),
            "Type" => Some(ParamKind::Type),
            _ => None,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bound configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// An integer value.
    Int(i64),
    /// A string value.
    String(String),
    /// A type value.
    Type(TypeId),
}

impl Arg {
    /// Returns the parameter kind this value satisfies.
    pub fn kind(&self) -> ParamKind {
        match self {
            Arg::Int(_) => ParamKind::Int,
            Arg::String(_) => ParamKind::String,
            Arg::Type(_) => ParamKind::Type,
        }
    }
}

/// Declared parameters of an instantiable, in declaration order.
pub type Params = NameMap<ParamKind>;

/// Bound arguments of an instance, in binding order.
pub type Args = NameMap<Arg>;

impl NameMap<ParamKind> {
    /// Checks that `args` binds exactly these parameters with matching kinds.
    ///
    /// `target` is the qualified name of the declaring instantiable, used in
    /// error messages.
    pub fn check_args(&self, args: &Args, target: &str, interner: &Interner) -> Result<(), IrError> {
        for (name, kind) in self.iter() {
            match args.get(name) {
                None => {
                    return Err(IrError::MissingArg {
                        target: target.to_string(),
                        name: interner.resolve(name).to_string(),
                    })
                }
                Some(arg) if arg.kind() != *kind => {
                    return Err(IrError::ArgKindMismatch {
                        target: target.to_string(),
                        name: interner.resolve(name).to_string(),
                        expected: *kind,
                        found: arg.kind(),
                    })
                }
                Some(_) => {}
            }
        }
        if let Some(extra) = args.names().find(|name| !self.contains(*name)) {
            return Err(IrError::UnexpectedArg {
                target: target.to_string(),
                name: interner.resolve(extra).to_string(),
            });
        }
        Ok(())
    }
}
