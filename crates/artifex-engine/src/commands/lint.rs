//! Store-free compile of a transcript

#![allow(clippy::result_large_err)]

use artifex_core::errors::ExError;
use artifex_core::model::LogEntry;
use artifex_core::rules::NoopResolver;
use artifex_core::snapshot::{compile_snapshot, CompileRequest, CompiledSnapshot};
use artifex_core::{ArtifexConfig, Linter, RuleCatalog};
use artifex_store::transcript::TranscriptV0;
use artifex_store::Result;
use chrono::Utc;

/// Compile a transcript as version 1 of its session without persisting it
///
/// Messages are sequenced in file order starting at 1. Cross-session
/// references are not resolved.
///
/// # Errors
///
/// Digest serialization failure; the transcript itself cannot make this
/// fail once it has parsed.
pub fn lint_transcript(
    transcript: &TranscriptV0,
    config: &ArtifexConfig,
    catalog: &RuleCatalog,
) -> Result<CompiledSnapshot> {
    let session = transcript.session();
    let entries: Vec<LogEntry> = transcript
        .to_messages()
        .iter()
        .zip(1u64..)
        .map(|(message, sequence)| LogEntry::from_message(message, sequence))
        .collect();

    let linter = Linter::new(catalog, &config.lint, &NoopResolver);
    compile_snapshot(CompileRequest {
        session_id: &session,
        entries: &entries,
        history: &[],
        config,
        linter: &linter,
        snapshot_id: uuid::Uuid::now_v7().to_string(),
        compiled_at: Utc::now(),
    })
    .map_err(|e| ExError::from(e).with_session_id(session.clone()))
}
