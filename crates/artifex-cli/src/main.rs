//! Artifex CLI
//!
//! Exit codes: `0` valid (warnings allowed), `1` invalid or failed,
//! `2` unreadable input.

use artifex_core::errors::ExError;
use artifex_core::logging_facility;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "artifex")]
#[command(about = "Artifex - Deterministic research artifact compiler", long_about = None)]
struct Cli {
    /// Engine configuration (TOML); a missing file means defaults
    #[arg(long, global = true, default_value = "artifex.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compile a transcript in memory and report findings
    Lint(commands::lint::LintArgs),
    /// Append a transcript's messages to the store
    Ingest(commands::ingest::IngestArgs),
    /// Compile a stored session into its next snapshot
    Compile(commands::compile::CompileArgs),
    /// Render a stored snapshot to Markdown
    Render(commands::render::RenderArgs),
    /// Show changes between two snapshot versions
    Diff(commands::diff::DiffArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match commands::load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => return report_failure(&e),
    };
    logging_facility::init(config.logging.profile());
    tracing::debug!(config = %cli.config.display(), "configuration loaded");

    let result = match cli.command {
        Commands::Lint(args) => commands::lint::execute(args, &config),
        Commands::Ingest(args) => commands::ingest::execute(args, config),
        Commands::Compile(args) => commands::compile::execute(args, config),
        Commands::Render(args) => commands::render::execute(args, config),
        Commands::Diff(args) => commands::diff::execute(args, config),
    };

    match result {
        Ok(verdict) => verdict.exit_code(),
        Err(e) => report_failure(&e),
    }
}

fn report_failure(err: &ExError) -> ExitCode {
    eprintln!("Error: {}", err);
    if err.kind().is_input_error() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}
