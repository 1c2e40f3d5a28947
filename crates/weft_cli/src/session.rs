//! Shared setup for commands: configuration lookup and diagnostic output.

use std::path::Path;

use weft_config::{ConfigError, WeftConfig};
use weft_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer};
use weft_json::{DecodeOptions, EncodeOptions};

use crate::{GlobalArgs, ReportFormat};

/// Loads the configuration for a command operating on `design`.
///
/// `--config` wins; otherwise `weft.toml` is looked up next to the design.
pub fn load_settings(global: &GlobalArgs, design: &Path) -> Result<WeftConfig, ConfigError> {
    match &global.config {
        Some(path) => weft_config::load_config_file(path),
        None => {
            let dir = match design.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir,
                _ => Path::new("."),
            };
            weft_config::load_config(dir)
        }
    }
}

/// Decode options from the `[load]` table.
pub fn decode_options(config: &WeftConfig) -> DecodeOptions {
    DecodeOptions {
        reject_unknown_config_keys: config.load.reject_unknown_config_keys,
    }
}

/// Encode options from the `[save]` table.
pub fn encode_options(config: &WeftConfig) -> EncodeOptions {
    EncodeOptions {
        indent: config.save.indent,
    }
}

/// Writes all diagnostics in `sink` to stderr (text) or stdout (JSON).
///
/// Returns the diagnostics that were written.
pub fn report(sink: &DiagnosticSink, format: ReportFormat, global: &GlobalArgs) -> Vec<Diagnostic> {
    let diagnostics = sink.take_all();
    match format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for diag in &diagnostics {
                if global.quiet && diag.severity != Severity::Error {
                    continue;
                }
                eprintln!("{}", renderer.render(diag));
            }
        }
        ReportFormat::Json => {
            let json =
                serde_json::to_string_pretty(&diagnostics).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
    diagnostics
}
