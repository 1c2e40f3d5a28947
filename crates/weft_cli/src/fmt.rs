//! `weft fmt`: rewrite a design in canonical form.

use weft_config::MAX_INDENT;
use weft_diagnostics::DiagnosticSink;
use weft_ir::Context;
use weft_json::{load_module, save_module};

use crate::session::{decode_options, encode_options, load_settings, report};
use crate::{FmtArgs, GlobalArgs, ReportFormat};

/// Runs the `weft fmt` command.
///
/// The input is overwritten unless `--output` is given. Nothing is written
/// when the input fails to load.
pub fn run(args: &FmtArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_settings(global, &args.file)?;
    let mut encode = encode_options(&config);
    if let Some(indent) = args.indent {
        if indent > MAX_INDENT {
            return Err(format!("--indent must be at most {MAX_INDENT}, found {indent}").into());
        }
        encode.indent = indent;
    }

    let mut ctx = Context::new();
    let sink = DiagnosticSink::new();
    let Some(top) = load_module(&mut ctx, &args.file, &decode_options(&config), &sink) else {
        report(&sink, ReportFormat::Text, global);
        return Ok(1);
    };

    let out = args.output.as_deref().unwrap_or(&args.file);
    let saved = save_module(&ctx, top, out, &encode, &sink);
    report(&sink, ReportFormat::Text, global);
    if saved && !global.quiet {
        eprintln!("   Formatted {} -> {}", args.file.display(), out.display());
    }
    Ok(if sink.has_errors() { 1 } else { 0 })
}
