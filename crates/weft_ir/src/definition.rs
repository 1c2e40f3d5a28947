//! Module definitions: instances and the connections between them.
//!
//! A [`ModuleDef`] is built detached from its module, populated with
//! instances and then connections, and finally handed to
//! [`Context::attach_def`](crate::Context::attach_def). Every reference is
//! validated as it is added.

use crate::context::Context;
use crate::error::IrError;
use crate::ids::{GeneratorId, ModuleId};
use crate::metadata::Metadata;
use crate::name_map::NameMap;
use crate::namespace::InstantiableRef;
use crate::param::Args;
use weft_common::Ident;

/// The wire-path instance name that addresses the defining module's own interface.
pub const SELF_INSTANCE: &str = "self";

/// An instance name plus a selector sequence addressing a sub-port.
///
/// Selectors index into arrays (`"3"`) or name record fields (`"data"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WirePath {
    /// The instance the path starts at, or `self`.
    pub instance: Ident,
    /// Selectors applied to the instance's interface, outermost first.
    pub selectors: Vec<Ident>,
}

impl WirePath {
    /// Creates a wire path.
    pub fn new(instance: Ident, selectors: Vec<Ident>) -> Self {
        Self {
            instance,
            selectors,
        }
    }
}

/// An unordered pair of wire paths denoting an electrical link.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// One endpoint.
    pub first: WirePath,
    /// The other endpoint.
    pub second: WirePath,
    /// Opaque annotations.
    pub metadata: Metadata,
}

impl Connection {
    /// Returns `true` if this connection links `a` and `b`, in either order.
    pub fn links(&self, a: &WirePath, b: &WirePath) -> bool {
        (self.first == *a && self.second == *b) || (self.first == *b && self.second == *a)
    }
}

/// A named use of an instantiable inside a definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// The instance name, unique within its definition.
    pub name: Ident,
    /// The instantiated module or generator.
    pub target: InstantiableRef,
    /// Configuration arguments, validated against the target's config params.
    pub config: Args,
    /// Generator arguments. Present exactly when `target` is a generator.
    pub genargs: Option<Args>,
    /// Opaque annotations.
    pub metadata: Metadata,
}

/// The body of a module: instances plus their wiring.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDef {
    module: ModuleId,
    instances: NameMap<Instance>,
    connections: Vec<Connection>,
    /// Opaque implementation blob carried through load and save.
    pub implementations: Metadata,
    /// Opaque annotations.
    pub metadata: Metadata,
}

impl ModuleDef {
    /// Creates an empty definition for `module`.
    pub fn new(module: ModuleId) -> Self {
        Self {
            module,
            instances: NameMap::new(),
            connections: Vec::new(),
            implementations: Metadata::new(),
            metadata: Metadata::new(),
        }
    }

    /// Returns the module this definition belongs to.
    pub fn module(&self) -> ModuleId {
        self.module
    }

    /// Adds an instance of `module`, checking `config` against its config params.
    pub fn add_instance(
        &mut self,
        ctx: &Context,
        name: &str,
        module: ModuleId,
        config: Args,
    ) -> Result<&mut Instance, IrError> {
        let target = InstantiableRef::Module(module);
        ctx.module(module).config_params.check_args(
            &config,
            &ctx.qualified_name(target),
            ctx.interner(),
        )?;
        self.insert_instance(
            ctx,
            Instance {
                name: ctx.intern(name),
                target,
                config,
                genargs: None,
                metadata: Metadata::new(),
            },
        )
    }

    /// Adds an instance of `generator`, checking `genargs` against its
    /// gen params and `config` against its config params.
    ///
    /// The generator is not run: the instance records the binding only.
    pub fn add_generator_instance(
        &mut self,
        ctx: &Context,
        name: &str,
        generator: GeneratorId,
        genargs: Args,
        config: Args,
    ) -> Result<&mut Instance, IrError> {
        let target = InstantiableRef::Generator(generator);
        let qualified = ctx.qualified_name(target);
        let gen = ctx.generator(generator);
        gen.gen_params
            .check_args(&genargs, &qualified, ctx.interner())?;
        gen.config_params
            .check_args(&config, &qualified, ctx.interner())?;
        self.insert_instance(
            ctx,
            Instance {
                name: ctx.intern(name),
                target,
                config,
                genargs: Some(genargs),
                metadata: Metadata::new(),
            },
        )
    }

    fn insert_instance(&mut self, ctx: &Context, instance: Instance) -> Result<&mut Instance, IrError> {
        let name = instance.name;
        if name == ctx.self_ident() {
            return Err(IrError::ReservedInstanceName {
                name: SELF_INSTANCE.to_string(),
            });
        }
        let module = self.module;
        match self.instances.try_insert(name, instance) {
            Ok(slot) => Ok(slot),
            Err(_) => Err(IrError::DuplicateInstance {
                module: ctx.qualified_name(InstantiableRef::Module(module)),
                name: ctx.name(name).to_string(),
            }),
        }
    }

    /// Returns the instance named `name`.
    pub fn instance(&self, name: Ident) -> Option<&Instance> {
        self.instances.get(name)
    }

    /// Iterates over instances in insertion order.
    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.instances.values()
    }

    /// Returns the number of instances.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Connects two wire paths.
    ///
    /// Both paths must start at an existing instance or at `self`. Connecting
    /// an already-linked pair (in either order) returns the existing connection.
    pub fn connect(&mut self, ctx: &Context, a: WirePath, b: WirePath) -> Result<&mut Connection, IrError> {
        self.check_endpoint(ctx, &a)?;
        self.check_endpoint(ctx, &b)?;
        let slot = match self.connections.iter().position(|c| c.links(&a, &b)) {
            Some(slot) => slot,
            None => {
                self.connections.push(Connection {
                    first: a,
                    second: b,
                    metadata: Metadata::new(),
                });
                self.connections.len() - 1
            }
        };
        Ok(&mut self.connections[slot])
    }

    /// Connects two wire paths and merges `metadata` into the connection.
    ///
    /// On an already-linked pair, entries already present survive unless
    /// `metadata` sets the same key.
    pub fn connect_with_metadata(
        &mut self,
        ctx: &Context,
        a: WirePath,
        b: WirePath,
        metadata: Metadata,
    ) -> Result<&mut Connection, IrError> {
        let connection = self.connect(ctx, a, b)?;
        connection.metadata.extend(metadata);
        Ok(connection)
    }

    fn check_endpoint(&self, ctx: &Context, path: &WirePath) -> Result<(), IrError> {
        if ctx.name(path.instance).is_empty() {
            return Err(IrError::EmptyWirePath);
        }
        if path.instance == ctx.self_ident() || self.instances.contains(path.instance) {
            return Ok(());
        }
        Err(IrError::UnknownInstance {
            module: ctx.qualified_name(InstantiableRef::Module(self.module)),
            instance: ctx.name(path.instance).to_string(),
        })
    }

    /// Returns the connections in insertion order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }
}
