//! Compile command
//!
//! Usage: artifex compile <SESSION> [--publish] [--format text|json]

use super::{emit, to_json, OutputFormat, StoreArgs, Verdict};
use artifex_core::errors::{ExError, ExErrorKind};
use artifex_core::render::render_report;
use artifex_core::snapshot::CompiledSnapshot;
use artifex_core::ArtifexConfig;
use artifex_core_types::SessionId;
use clap::Args;

#[derive(Debug, Args)]
pub struct CompileArgs {
    pub session: String,

    /// Mark the snapshot published; refused when it has errors
    #[arg(long)]
    pub publish: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub store: StoreArgs,
}

pub fn execute(args: CompileArgs, config: ArtifexConfig) -> Result<Verdict, ExError> {
    let engine = args.store.open(config)?;
    let session = SessionId::new(args.session.as_str());

    let (snapshot, published) = if args.publish {
        match engine.publish_session(&session) {
            Ok(outcome) => (outcome.snapshot, true),
            Err(e) if e.kind() == ExErrorKind::PublishBlocked => {
                eprintln!("Error: {}", e);
                let version = e.version().unwrap_or_default();
                (engine.snapshot(&session, version)?, false)
            }
            Err(e) => return Err(e),
        }
    } else {
        (engine.compile_session(&session)?.snapshot, false)
    };

    match args.format {
        OutputFormat::Text => emit(&summary(&snapshot, published))?,
        OutputFormat::Json => emit(&to_json(&snapshot)?)?,
    }
    Ok(Verdict::from_passed(snapshot.publishable))
}

fn summary(snapshot: &CompiledSnapshot, published: bool) -> String {
    let mut out = format!(
        "Snapshot compiled:\n  session: {}\n  version: {}\n  snapshot_id: {}\n  log_cursor: {}\n  artifact_digest: {}\n",
        snapshot.session_id,
        snapshot.version,
        snapshot.snapshot_id,
        snapshot.log_cursor,
        snapshot.artifact_digest
    );
    if published {
        out.push_str("  (published)\n");
    }
    out.push('\n');
    out.push_str(&render_report(&snapshot.report));
    out
}
