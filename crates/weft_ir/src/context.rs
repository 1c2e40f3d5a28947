//! The context: sole owner of namespaces, instantiables, and interned types.
//!
//! The context also implements the symbol table: instance references are
//! resolved by `(namespace, name)` through [`Context::resolve_symbol`].

use crate::arena::Arena;
use crate::definition::{ModuleDef, WirePath, SELF_INSTANCE};
use crate::error::IrError;
use crate::ids::{GeneratorId, ModuleId, NamespaceId, TypeId};
use crate::metadata::Metadata;
use crate::module::{Generator, Module};
use crate::namespace::{InstantiableRef, Namespace};
use crate::param::Params;
use crate::types::{DuplicateField, Type, TypeDb};
use std::collections::HashMap;
use weft_common::{Ident, Interner};

/// Owner of every namespace, module, generator, and type in a design.
///
/// Namespaces are created lazily by name and live as long as the context.
/// A context is not shared between threads; callers run one load or save at
/// a time against it.
#[derive(Debug)]
pub struct Context {
    interner: Interner,
    types: TypeDb,
    namespaces: Arena<NamespaceId, Namespace>,
    namespace_index: HashMap<Ident, NamespaceId>,
    modules: Arena<ModuleId, Module>,
    generators: Arena<GeneratorId, Generator>,
    self_ident: Ident,
}

/// A restore point taken by [`Context::snapshot`].
///
/// Restoring drops every namespace, declaration, type, and definition added
/// after the snapshot was taken. Metadata edits on surviving entities are
/// not tracked.
#[derive(Debug, Clone)]
pub struct Snapshot {
    types: usize,
    namespaces: usize,
    modules: usize,
    generators: usize,
    symbols: Vec<(usize, usize)>,
    defined: Vec<bool>,
}

impl Context {
    /// Creates an empty context holding only the leaf types.
    pub fn new() -> Self {
        let interner = Interner::new();
        let self_ident = interner.get_or_intern(SELF_INSTANCE);
        Self {
            interner,
            types: TypeDb::new(),
            namespaces: Arena::new(),
            namespace_index: HashMap::new(),
            modules: Arena::new(),
            generators: Arena::new(),
            self_ident,
        }
    }

    // --- Names ---

    /// Returns the interner that owns every name in this context.
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Interns a name.
    pub fn intern(&self, name: &str) -> Ident {
        self.interner.get_or_intern(name)
    }

    /// Resolves an interned name.
    pub fn name(&self, ident: Ident) -> &str {
        self.interner.resolve(ident)
    }

    /// The interned `self` wire-path root.
    pub fn self_ident(&self) -> Ident {
        self.self_ident
    }

    /// Builds a wire path from strings.
    pub fn wire_path(&self, instance: &str, selectors: &[&str]) -> WirePath {
        WirePath::new(
            self.intern(instance),
            selectors.iter().map(|s| self.intern(s)).collect(),
        )
    }

    // --- Types ---

    /// Returns the type database.
    pub fn types(&self) -> &TypeDb {
        &self.types
    }

    /// Returns the type with the given ID.
    pub fn ty(&self, id: TypeId) -> &Type {
        self.types.get(id)
    }

    /// The `Any` type.
    pub fn any(&self) -> TypeId {
        TypeDb::ANY
    }

    /// The `BitIn` type.
    pub fn bit_in(&self) -> TypeId {
        TypeDb::BIT_IN
    }

    /// The `BitOut` type.
    pub fn bit_out(&self) -> TypeId {
        TypeDb::BIT_OUT
    }

    /// Interns `Array(len, element)`.
    pub fn array(&mut self, element: TypeId, len: u32) -> TypeId {
        self.types.array(element, len)
    }

    /// Interns a record type from `(field name, type)` pairs in order.
    pub fn record<'a>(
        &mut self,
        fields: impl IntoIterator<Item = (&'a str, TypeId)>,
    ) -> Result<TypeId, IrError> {
        let fields = fields
            .into_iter()
            .map(|(name, ty)| (self.interner.get_or_intern(name), ty))
            .collect();
        self.types
            .record(fields)
            .map_err(|DuplicateField(field)| IrError::DuplicateField {
                field: self.interner.resolve(field).to_string(),
            })
    }

    // --- Namespaces ---

    /// Returns `true` if a namespace named `name` exists.
    pub fn has_namespace(&self, name: &str) -> bool {
        self.namespace_by_name(name).is_some()
    }

    /// Looks up a namespace by name.
    pub fn namespace_by_name(&self, name: &str) -> Option<NamespaceId> {
        let ident = self.interner.get(name)?;
        self.namespace_index.get(&ident).copied()
    }

    /// Returns the namespace with the given ID.
    pub fn namespace(&self, id: NamespaceId) -> &Namespace {
        &self.namespaces[id]
    }

    /// Iterates over namespaces in creation order.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.values()
    }

    /// Returns the namespace named `name`, creating it if needed.
    pub fn get_or_create_namespace(&mut self, name: &str) -> NamespaceId {
        let ident = self.interner.get_or_intern(name);
        if let Some(&id) = self.namespace_index.get(&ident) {
            return id;
        }
        let id = self.namespaces.next_id();
        self.namespaces.alloc(Namespace::new(id, ident));
        self.namespace_index.insert(ident, id);
        id
    }

    // --- Declarations ---

    fn check_free(&self, ns: NamespaceId, name: Ident) -> Result<(), IrError> {
        let namespace = &self.namespaces[ns];
        if namespace.has_symbol(name) {
            return Err(IrError::DuplicateSymbol {
                namespace: self.name(namespace.name).to_string(),
                name: self.name(name).to_string(),
            });
        }
        Ok(())
    }

    /// Declares a module without a definition and registers it in `ns`
    /// immediately, so later declarations and definitions can reference it.
    pub fn new_module_decl(
        &mut self,
        ns: NamespaceId,
        name: &str,
        ty: TypeId,
        config_params: Params,
    ) -> Result<ModuleId, IrError> {
        let name = self.interner.get_or_intern(name);
        self.check_free(ns, name)?;
        let id = self.modules.alloc(Module {
            id: self.modules.next_id(),
            name,
            namespace: ns,
            ty,
            config_params,
            metadata: Metadata::new(),
            def: None,
        });
        self.namespaces[ns].modules.insert(name, id);
        Ok(id)
    }

    /// Declares a generator and registers it in `ns`.
    pub fn new_generator_decl(
        &mut self,
        ns: NamespaceId,
        name: &str,
        gen_params: Params,
        config_params: Params,
    ) -> Result<GeneratorId, IrError> {
        let name = self.interner.get_or_intern(name);
        self.check_free(ns, name)?;
        let id = self.generators.alloc(Generator {
            id: self.generators.next_id(),
            name,
            namespace: ns,
            gen_params,
            config_params,
            metadata: Metadata::new(),
        });
        self.namespaces[ns].generators.insert(name, id);
        Ok(id)
    }

    /// Returns the module with the given ID.
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id]
    }

    /// Returns the module with the given ID for mutation.
    pub fn module_mut(&mut self, id: ModuleId) -> &mut Module {
        &mut self.modules[id]
    }

    /// Returns the generator with the given ID.
    pub fn generator(&self, id: GeneratorId) -> &Generator {
        &self.generators[id]
    }

    /// Returns the generator with the given ID for mutation.
    pub fn generator_mut(&mut self, id: GeneratorId) -> &mut Generator {
        &mut self.generators[id]
    }

    /// Returns the number of declared modules across all namespaces.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    // --- Symbol table ---

    /// Resolves `namespace.name` to a module or generator.
    ///
    /// Matching is exact. Fails with [`IrError::MissingSymbol`] if the
    /// namespace does not exist or does not register the name.
    pub fn resolve_symbol(&self, namespace: &str, name: &str) -> Result<InstantiableRef, IrError> {
        let found = self.namespace_by_name(namespace).and_then(|ns| {
            let ident = self.interner.get(name)?;
            self.namespaces[ns].symbol(ident)
        });
        found.ok_or_else(|| IrError::MissingSymbol {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }

    /// Resolves `namespace.name` and requires it to be a module.
    pub fn resolve_module(&self, namespace: &str, name: &str) -> Result<ModuleId, IrError> {
        let found = self.resolve_symbol(namespace, name)?;
        found.as_module().ok_or_else(|| IrError::WrongInstantiableKind {
            name: self.qualified_name(found),
            expected: "module",
        })
    }

    /// Returns the `(namespace, name)` pair identifying an instantiable.
    pub fn symbol_of(&self, target: InstantiableRef) -> (Ident, Ident) {
        let (ns, name) = match target {
            InstantiableRef::Module(id) => (self.modules[id].namespace, self.modules[id].name),
            InstantiableRef::Generator(id) => {
                (self.generators[id].namespace, self.generators[id].name)
            }
        };
        (self.namespaces[ns].name, name)
    }

    /// Returns `namespace.name` for an instantiable.
    pub fn qualified_name(&self, target: InstantiableRef) -> String {
        let (ns, name) = self.symbol_of(target);
        format!("{}.{}", self.name(ns), self.name(name))
    }

    // --- Definitions ---

    /// Attaches a finished definition to the module it was created for.
    ///
    /// A module is defined at most once.
    pub fn attach_def(&mut self, def: ModuleDef) -> Result<(), IrError> {
        let id = def.module();
        if self.modules[id].def.is_some() {
            return Err(IrError::DefinitionMismatch {
                module: self.qualified_name(InstantiableRef::Module(id)),
                reason: "module already has a definition",
            });
        }
        self.modules[id].def = Some(def);
        Ok(())
    }

    // --- Rollback ---

    /// Records the current extent of the context.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            types: self.types.len(),
            namespaces: self.namespaces.len(),
            modules: self.modules.len(),
            generators: self.generators.len(),
            symbols: self
                .namespaces
                .values()
                .map(|ns| (ns.modules.len(), ns.generators.len()))
                .collect(),
            defined: self.modules.values().map(Module::has_def).collect(),
        }
    }

    /// Rolls the context back to `snapshot`.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.types.truncate(snapshot.types);
        self.modules.truncate(snapshot.modules);
        self.generators.truncate(snapshot.generators);
        self.namespaces.truncate(snapshot.namespaces);
        self.namespace_index
            .retain(|_, id| (id.as_raw() as usize) < snapshot.namespaces);
        for (ns, &(modules, generators)) in self.namespaces.values_mut().zip(&snapshot.symbols) {
            ns.modules.truncate(modules);
            ns.generators.truncate(generators);
        }
        for (module, &defined) in self.modules.values_mut().zip(&snapshot.defined) {
            if !defined {
                module.def = None;
            }
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
