//! `weft check`: load a design and report diagnostics.
//!
//! On success a one-line summary of the root module is printed; with
//! `--verbose` every namespace is listed as well.

use serde_json::Value;
use weft_diagnostics::DiagnosticSink;
use weft_ir::{Context, InstantiableRef, ModuleId, TypeId};
use weft_json::{encode_type, load_module};

use crate::session::{decode_options, load_settings, report};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Runs the `weft check` command.
///
/// Returns exit code 0 if the design loaded, 1 if any error was reported.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_settings(global, &args.file)?;
    let mut options = decode_options(&config);
    options.reject_unknown_config_keys |= args.strict;

    let chatty = !global.quiet && args.format == ReportFormat::Text;
    if chatty {
        eprintln!("   Checking {}", args.file.display());
    }

    let mut ctx = Context::new();
    let sink = DiagnosticSink::new();
    let top = load_module(&mut ctx, &args.file, &options, &sink);
    report(&sink, args.format, global);

    let Some(top) = top else {
        return Ok(1);
    };
    if chatty {
        eprintln!("{}", summarize(&ctx, top));
        if global.verbose {
            for line in namespace_lines(&ctx) {
                eprintln!("{line}");
            }
        }
    }
    Ok(if sink.has_errors() { 1 } else { 0 })
}

/// Describes the root module in one line.
pub fn summarize(ctx: &Context, top: ModuleId) -> String {
    let module = ctx.module(top);
    let name = ctx.qualified_name(InstantiableRef::Module(top));
    let ty = type_label(ctx, module.ty);
    match module.def() {
        Some(def) => format!(
            "     Loaded {name}: {ty}, {} instance(s), {} connection(s)",
            def.instance_count(),
            def.connections().len()
        ),
        None => format!("     Loaded {name}: {ty}, no definition"),
    }
}

fn namespace_lines(ctx: &Context) -> Vec<String> {
    ctx.namespaces()
        .map(|ns| {
            format!(
                "       {}: {} module(s), {} generator(s)",
                ctx.name(ns.name),
                ns.modules().count(),
                ns.generators().count()
            )
        })
        .collect()
}

fn type_label(ctx: &Context, ty: TypeId) -> String {
    match encode_type(ctx, ty) {
        Value::String(leaf) => leaf,
        compound => compound.to_string(),
    }
}
