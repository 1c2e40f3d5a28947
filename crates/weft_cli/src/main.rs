//! Weft CLI: the command-line front end for WeftIR design documents.
//!
//! Provides `weft check` to load a design and report problems, and
//! `weft fmt` to rewrite a design in canonical form.

#![warn(missing_docs)]

mod check;
mod fmt;
mod session;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Weft: load, check and format hardware module graphs.
#[derive(Parser, Debug)]
#[command(name = "weft", version, about = "WeftIR design tools")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print extra detail about the loaded design.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `weft.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a design and report any errors.
    Check(CheckArgs),
    /// Load a design and write it back in canonical form.
    Fmt(FmtArgs),
}

/// Arguments for the `weft check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// The design document to load.
    pub file: PathBuf,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Reject instance config keys that the module does not declare.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `weft fmt` subcommand.
#[derive(Parser, Debug)]
pub struct FmtArgs {
    /// The design document to format.
    pub file: PathBuf,

    /// Write the result here instead of overwriting the input.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Spaces per indentation level, overriding `save.indent`.
    #[arg(long)]
    pub indent: Option<usize>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => stderr_is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Check(ref args) => check::run(args, &global),
        Command::Fmt(ref args) => fmt::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

fn stderr_is_terminal() -> bool {
    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_check_default() {
        let cli = Cli::parse_from(["weft", "check", "top.json"]);
        match cli.command {
            Command::Check(ref args) => {
                assert_eq!(args.file, PathBuf::from("top.json"));
                assert_eq!(args.format, ReportFormat::Text);
                assert!(!args.strict);
            }
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_check_with_args() {
        let cli = Cli::parse_from(["weft", "check", "top.json", "--format", "json", "--strict"]);
        match cli.command {
            Command::Check(ref args) => {
                assert_eq!(args.format, ReportFormat::Json);
                assert!(args.strict);
            }
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_fmt_default() {
        let cli = Cli::parse_from(["weft", "fmt", "top.json"]);
        match cli.command {
            Command::Fmt(ref args) => {
                assert_eq!(args.file, PathBuf::from("top.json"));
                assert!(args.output.is_none());
                assert!(args.indent.is_none());
            }
            _ => panic!("expected Fmt command"),
        }
    }

    #[test]
    fn parse_fmt_with_output() {
        let cli = Cli::parse_from(["weft", "fmt", "in.json", "-o", "out.json", "--indent", "0"]);
        match cli.command {
            Command::Fmt(ref args) => {
                assert_eq!(args.output, Some(PathBuf::from("out.json")));
                assert_eq!(args.indent, Some(0));
            }
            _ => panic!("expected Fmt command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["weft", "--quiet", "--color", "never", "check", "a.json"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["weft", "fmt", "a.json", "--verbose", "--color", "always"]);
        assert!(cli.verbose);
        assert_eq!(cli.color, ColorChoice::Always);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["weft", "--config", "/path/to/weft.toml", "check", "a.json"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/weft.toml")));
    }

    #[test]
    fn missing_file_argument_is_rejected() {
        assert!(Cli::try_parse_from(["weft", "check"]).is_err());
    }
}
