//! Namespaces: the second level of the symbol table.

use crate::ids::{GeneratorId, ModuleId, NamespaceId};
use crate::name_map::NameMap;
use weft_common::Ident;

/// A reference to something an instance can instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstantiableRef {
    /// A module.
    Module(ModuleId),
    /// A generator.
    Generator(GeneratorId),
}

impl InstantiableRef {
    /// Returns the module ID if this references a module.
    pub fn as_module(self) -> Option<ModuleId> {
        match self {
            InstantiableRef::Module(id) => Some(id),
            InstantiableRef::Generator(_) => None,
        }
    }
}

/// A named container of modules and generators.
///
/// Module and generator names share one symbol space: a name is registered at
/// most once across both maps.
#[derive(Debug, Clone)]
pub struct Namespace {
    /// The unique ID of this namespace.
    pub id: NamespaceId,
    /// The globally unique namespace name.
    pub name: Ident,
    pub(crate) modules: NameMap<ModuleId>,
    pub(crate) generators: NameMap<GeneratorId>,
}

impl Namespace {
    pub(crate) fn new(id: NamespaceId, name: Ident) -> Self {
        Self {
            id,
            name,
            modules: NameMap::new(),
            generators: NameMap::new(),
        }
    }

    /// Looks up `name` as a module or generator.
    pub fn symbol(&self, name: Ident) -> Option<InstantiableRef> {
        if let Some(&id) = self.modules.get(name) {
            return Some(InstantiableRef::Module(id));
        }
        self.generators
            .get(name)
            .map(|&id| InstantiableRef::Generator(id))
    }

    /// Returns `true` if `name` is registered as either kind.
    pub fn has_symbol(&self, name: Ident) -> bool {
        self.modules.contains(name) || self.generators.contains(name)
    }

    /// Iterates over `(name, module)` pairs in declaration order.
    pub fn modules(&self) -> impl Iterator<Item = (Ident, ModuleId)> + '_ {
        self.modules.iter().map(|(name, id)| (name, *id))
    }

    /// Iterates over `(name, generator)` pairs in declaration order.
    pub fn generators(&self) -> impl Iterator<Item = (Ident, GeneratorId)> + '_ {
        self.generators.iter().map(|(name, id)| (name, *id))
    }
}
