//! Lint command
//!
//! Usage: artifex lint <TRANSCRIPT> [--format text|json]
//!
//! Compiles the transcript in memory; nothing is stored.

use super::{emit, to_json, OutputFormat, Verdict};
use artifex_core::errors::ExError;
use artifex_core::render::render_report;
use artifex_core::{ArtifexConfig, RuleCatalog};
use artifex_engine::lint_transcript;
use artifex_store::transcript::parse_transcript_file;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct LintArgs {
    /// Transcript file (`.json`, otherwise YAML)
    pub transcript: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn execute(args: LintArgs, config: &ArtifexConfig) -> Result<Verdict, ExError> {
    let transcript = parse_transcript_file(&args.transcript)?;
    let snapshot = lint_transcript(&transcript, config, &RuleCatalog::standard())?;

    match args.format {
        OutputFormat::Text => emit(&render_report(&snapshot.report))?,
        OutputFormat::Json => emit(&to_json(&snapshot.report)?)?,
    }
    Ok(Verdict::from_passed(snapshot.report.passed))
}
