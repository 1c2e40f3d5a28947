//! Diagnostic creation, severity management, and terminal rendering.
//!
//! This crate provides structured [`Diagnostic`] messages with severity levels
//! and error codes. The [`DiagnosticSink`] accumulates diagnostics emitted while
//! loading or saving a design, and [`TerminalRenderer`] formats them for the CLI.
//!
//! The sink is always passed explicitly; nothing in the IR or codec holds a
//! global error channel.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
