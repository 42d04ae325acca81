//! Ingest command
//!
//! Usage: artifex ingest <TRANSCRIPT> [--db <PATH>] [--cas <PATH>]

use super::{emit, StoreArgs, Verdict};
use artifex_core::errors::ExError;
use artifex_core::ArtifexConfig;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Transcript file (`.json`, otherwise YAML)
    pub transcript: PathBuf,

    #[command(flatten)]
    pub store: StoreArgs,
}

pub fn execute(args: IngestArgs, config: ArtifexConfig) -> Result<Verdict, ExError> {
    let engine = args.store.open(config)?;
    let summary = engine.ingest_transcript(&args.transcript)?;

    emit(&format!(
        "Ingested {}:\n  appended: {}\n  duplicates: {}\n  operations: {}\n  rejected blocks: {}\n",
        summary.session_id,
        summary.appended,
        summary.duplicates,
        summary.operations,
        summary.rejected_blocks
    ))?;
    Ok(Verdict::Valid)
}
