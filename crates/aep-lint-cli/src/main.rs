//! aep-lint CLI tool.
//!
//! Usage:
//! ```bash
//! aep-lint check [OPTIONS] [PATHS]...
//! aep-lint list-rules
//! aep-lint init
//! ```
//!
//! Exit status: `0` when clean, `1` when findings reach the `fail_on`
//! threshold, `2` when the run could not be set up.

use std::path::PathBuf;
use std::process::ExitCode;

use aep_lint_core::{LoadError, RegistryError, Severity};
use clap::{Parser, Subcommand};
use miette::{Diagnostic, GraphicalReportHandler};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod discover;

/// Linter for API schemas following the AEP resource naming conventions
#[derive(Parser)]
#[command(name = "aep-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "AEP_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks over JSON descriptor sets
    Check {
        /// Descriptor files or directories to analyze (default: current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated, full or short names)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Lowest severity that fails the run (overrides config)
        #[arg(long)]
        fail_on: Option<Severity>,

        /// Worker threads for rule dispatch (overrides config)
        #[arg(short = 'j', long)]
        parallelism: Option<usize>,
    },

    /// List available rules
    ListRules {
        /// Output format (`compact` prints full rule names only)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Commands::Check {
            paths,
            format,
            rules,
            exclude,
            fail_on,
            parallelism,
        } => commands::check::run(&commands::check::CheckArgs {
            paths,
            format,
            rules,
            exclude,
            fail_on,
            parallelism,
            config: cli.config,
        })
        .map(ExitCode::from),
        Commands::ListRules { format } => {
            commands::list_rules::run(format).map(|()| ExitCode::SUCCESS)
        }
        Commands::Init { force } => commands::init::run(force).map(|()| ExitCode::SUCCESS),
    };

    outcome.unwrap_or_else(|err| {
        report(&err);
        ExitCode::from(2)
    })
}

/// Prints a setup error, rendering miette diagnostics when one is in the chain.
fn report(err: &anyhow::Error) {
    let diagnostic: Option<&dyn Diagnostic> = err
        .downcast_ref::<LoadError>()
        .map(|e| e as &dyn Diagnostic)
        .or_else(|| {
            err.downcast_ref::<RegistryError>()
                .map(|e| e as &dyn Diagnostic)
        });

    if let Some(diagnostic) = diagnostic {
        let mut rendered = String::new();
        if GraphicalReportHandler::new()
            .render_report(&mut rendered, diagnostic)
            .is_ok()
        {
            eprintln!("Error: {err}");
            eprint!("{rendered}");
            return;
        }
    }
    eprintln!("Error: {err:?}");
}
