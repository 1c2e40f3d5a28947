//! Shared foundational types used across the Weft circuit IR crates.
//!
//! Currently this is the interned identifier type used for every name in the
//! IR: namespaces, modules, instances, record fields, parameters and selectors.

#![warn(missing_docs)]

pub mod ident;

pub use ident::{Ident, Interner};
