//! Vigil CLI: streams compiler check findings into SARIF reports.
//!
//! Provides `vigil report` for writing a SARIF 2.1.0 document from a batch of
//! findings and host diagnostics, and `vigil check` for printing the same
//! findings to the terminal with their suggested fixes.

#![warn(missing_docs)]

mod check;
mod input;
mod report;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Vigil: SARIF reporting for compiler checks.
#[derive(Parser, Debug)]
#[command(name = "vigil", version, about = "SARIF reporting for compiler checks")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `vigil.toml` configuration file or its directory.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a SARIF report for a batch of diagnostics.
    Report(ReportArgs),
    /// Print a batch of findings to the terminal.
    Check(CheckArgs),
}

/// Arguments for the `vigil report` subcommand.
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// JSON batch of sources, findings, and host diagnostics.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Report path; overrides `output.path` from `vigil.toml`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `vigil check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// JSON batch of sources and findings.
    #[arg(short, long)]
    pub input: PathBuf,
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

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

impl GlobalArgs {
    /// The default log filter for these flags; `RUST_LOG` takes precedence.
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::env::var("TERM").is_ok_and(|term| term != "dumb"),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    init_tracing(global.log_level());

    let result = match cli.command {
        Command::Report(ref args) => report::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber.
fn init_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
