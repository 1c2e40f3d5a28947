//! Loading and saving documents as text and files.
//!
//! The string functions return [`CodecError`]s. The file functions report
//! failures as a single fatal diagnostic on the caller's sink instead.

use crate::decode::decode_document;
use crate::encode::encode_context;
use crate::error::CodecError;
use crate::options::{DecodeOptions, EncodeOptions};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use std::path::Path;
use tracing::debug;
use weft_diagnostics::DiagnosticSink;
use weft_ir::{Context, ModuleId};

/// Parses `text` and decodes it into `ctx`, returning the top module.
///
/// Warnings go to `sink`; the failure, if any, is returned.
pub fn load_module_from_str(
    ctx: &mut Context,
    text: &str,
    options: &DecodeOptions,
    sink: &DiagnosticSink,
) -> Result<ModuleId, CodecError> {
    let doc: Value = serde_json::from_str(text)?;
    decode_document(ctx, &doc, options, sink)
}

/// Encodes the context with `module` as the top module.
///
/// The text ends with a newline.
pub fn save_module_to_string(ctx: &Context, module: ModuleId, options: &EncodeOptions) -> String {
    let doc = encode_context(ctx, module);
    let mut out = if options.indent == 0 {
        doc.to_string()
    } else {
        render_pretty(&doc, options.indent)
    };
    out.push('\n');
    out
}

fn render_pretty(doc: &Value, indent: usize) -> String {
    let indent = vec![b' '; indent];
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
    // Writing a Value into memory cannot fail and always produces UTF-8.
    if doc.serialize(&mut ser).is_err() {
        return doc.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| doc.to_string())
}

/// Loads the document at `path` into `ctx`.
///
/// Returns the top module, or `None` after emitting one fatal diagnostic on
/// `sink`. A failed load leaves `ctx` unchanged.
pub fn load_module(
    ctx: &mut Context,
    path: &Path,
    options: &DecodeOptions,
    sink: &DiagnosticSink,
) -> Option<ModuleId> {
    debug!(path = %path.display(), "loading module");
    let result = std::fs::read_to_string(path)
        .map_err(|source| CodecError::Io {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|text| load_module_from_str(ctx, &text, options, sink));
    match result {
        Ok(top) => {
            debug!(path = %path.display(), modules = ctx.module_count(), "loaded module");
            Some(top)
        }
        Err(err) => {
            report(sink, &err, format!("while loading {}", path.display()));
            None
        }
    }
}

/// Saves the context with `module` as the top module to `path`.
///
/// Returns `false` after emitting one fatal diagnostic on `sink` if the file
/// cannot be written.
pub fn save_module(
    ctx: &Context,
    module: ModuleId,
    path: &Path,
    options: &EncodeOptions,
    sink: &DiagnosticSink,
) -> bool {
    debug!(path = %path.display(), "saving module");
    let text = save_module_to_string(ctx, module, options);
    match std::fs::write(path, text) {
        Ok(()) => true,
        Err(source) => {
            let err = CodecError::Io {
                path: path.to_path_buf(),
                source,
            };
            report(sink, &err, format!("while saving {}", path.display()));
            false
        }
    }
}

fn report(sink: &DiagnosticSink, err: &CodecError, note: String) {
    debug!(code = %err.code(), error = %err, "reporting codec failure");
    sink.emit(err.to_diagnostic().with_note(note));
}
