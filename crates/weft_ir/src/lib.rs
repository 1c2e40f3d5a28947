//! WeftIR: the in-memory graph of typed, composable hardware modules.
//!
//! A [`Context`] owns every [`Namespace`], [`Module`], [`Generator`] and interned
//! [`Type`]. Modules have a structural interface type and may carry a
//! [`ModuleDef`] made of [`Instance`]s of other instantiables wired together by
//! [`Connection`]s. Instance references resolve through the two-level
//! namespace/name symbol table on the context.

#![warn(missing_docs)]

pub mod arena;
pub mod context;
pub mod definition;
pub mod error;
pub mod ids;
pub mod metadata;
pub mod module;
pub mod name_map;
pub mod namespace;
pub mod param;
pub mod types;

pub use arena::{Arena, ArenaId};
pub use context::{Context, Snapshot};
pub use definition::{Connection, Instance, ModuleDef, WirePath, SELF_INSTANCE};
pub use error::IrError;
pub use ids::{GeneratorId, ModuleId, NamespaceId, TypeId};
pub use metadata::Metadata;
pub use module::{Generator, Module};
pub use name_map::NameMap;
pub use namespace::{InstantiableRef, Namespace};
pub use param::{Arg, Args, ParamKind, Params};
pub use types::{Type, TypeDb};
