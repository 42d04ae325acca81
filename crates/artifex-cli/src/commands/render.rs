//! Render command
//!
//! Usage: artifex render <SESSION> [--version <N>] [--output <FILE>]

use super::{emit, StoreArgs, Verdict};
use artifex_core::errors::{ExError, ExErrorKind};
use artifex_core::render::render_snapshot;
use artifex_core::ArtifexConfig;
use artifex_core_types::SessionId;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    pub session: String,

    /// Snapshot version (default: latest)
    #[arg(long)]
    pub version: Option<u32>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub store: StoreArgs,
}

pub fn execute(args: RenderArgs, config: ArtifexConfig) -> Result<Verdict, ExError> {
    let engine = args.store.open(config)?;
    let session = SessionId::new(args.session.as_str());

    let snapshot = match args.version {
        Some(version) => engine.snapshot(&session, version)?,
        None => engine.latest_snapshot(&session)?.ok_or_else(|| {
            ExError::new(ExErrorKind::NotFound)
                .with_op("render")
                .with_session_id(session.clone())
                .with_message("session has no compiled snapshot")
        })?,
    };
    let markdown = render_snapshot(&snapshot);

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, markdown).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("render")
                .with_entity_id(output_path.display().to_string())
                .with_message(e.to_string())
        })?;
        emit(&format!("Rendered v{} to {}\n", snapshot.version, output_path.display()))?;
    } else {
        emit(&markdown)?;
    }
    Ok(Verdict::Valid)
}
