//! Instantiables: modules and generators.
//!
//! A [`Module`] has a structural interface type and, once defined, a
//! [`ModuleDef`]. A module without a definition is an external declaration.
//! A [`Generator`] is a parametric producer of modules; it can be declared and
//! referenced, but producing modules from it is not supported.

use crate::definition::ModuleDef;
use crate::ids::{GeneratorId, ModuleId, NamespaceId, TypeId};
use crate::metadata::Metadata;
use crate::param::Params;
use weft_common::Ident;

/// A named, typed circuit unit.
#[derive(Debug, Clone)]
pub struct Module {
    /// The unique ID of this module in the context.
    pub id: ModuleId,
    /// The module name, unique within its namespace.
    pub name: Ident,
    /// The owning namespace.
    pub namespace: NamespaceId,
    /// The module's interface type.
    pub ty: TypeId,
    /// Configuration parameters instances must bind.
    pub config_params: Params,
    /// Opaque annotations.
    pub metadata: Metadata,
    pub(crate) def: Option<ModuleDef>,
}

impl Module {
    /// Returns the definition, or `None` for an external declaration.
    pub fn def(&self) -> Option<&ModuleDef> {
        self.def.as_ref()
    }

    /// Returns `true` if the module has a definition.
    pub fn has_def(&self) -> bool {
        self.def.is_some()
    }
}

/// A parametric producer of modules.
#[derive(Debug, Clone)]
pub struct Generator {
    /// The unique ID of this generator in the context.
    pub id: GeneratorId,
    /// The generator name, unique within its namespace.
    pub name: Ident,
    /// The owning namespace.
    pub namespace: NamespaceId,
    /// Parameters every generator instance must bind as genargs.
    pub gen_params: Params,
    /// Configuration parameters instances must bind.
    pub config_params: Params,
    /// Opaque annotations.
    pub metadata: Metadata,
}
