//! JSON persistence for WeftIR designs.
//!
//! [`save_module`] writes every namespace of a [`Context`](weft_ir::Context)
//! plus a record of the top module; [`load_module`] rebuilds the graph from
//! such a document in two passes: all module declarations first, so that
//! instances may reference modules declared later or in other namespaces,
//! then all definitions.
//!
//! A load either succeeds completely or leaves the context untouched and
//! reports one fatal diagnostic.

#![warn(missing_docs)]

pub mod decode;
pub mod encode;
pub mod error;
pub mod io;
pub mod options;

mod doc;
mod metadata;
mod params;
mod types;

pub use decode::decode_document;
pub use encode::encode_context;
pub use error::CodecError;
pub use io::{load_module, load_module_from_str, save_module, save_module_to_string};
pub use options::{DecodeOptions, EncodeOptions};
pub use params::{decode_args, decode_params, encode_args, encode_params};
pub use types::{decode_type, encode_type};
