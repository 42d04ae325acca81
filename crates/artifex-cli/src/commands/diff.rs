//! Diff command
//!
//! Usage: artifex diff <SESSION> <FROM> <TO> [--format text|json]

use super::{emit, to_json, OutputFormat, StoreArgs, Verdict};
use artifex_core::diff::render_human_summary;
use artifex_core::errors::ExError;
use artifex_core::ArtifexConfig;
use artifex_core_types::SessionId;
use clap::Args;

#[derive(Debug, Args)]
pub struct DiffArgs {
    pub session: String,
    pub from: u32,
    pub to: u32,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub store: StoreArgs,
}

pub fn execute(args: DiffArgs, config: ArtifexConfig) -> Result<Verdict, ExError> {
    let engine = args.store.open(config)?;
    let delta = engine.diff_snapshots(&SessionId::new(args.session.as_str()), args.from, args.to)?;

    match args.format {
        OutputFormat::Text => emit(&render_human_summary(&delta))?,
        OutputFormat::Json => emit(&to_json(&delta)?)?,
    }
    Ok(Verdict::Valid)
}
