//! Compiled snapshot schema and the pure compile step
//!
//! ## Schema Version
//!
//! Current snapshot schema version: **1**
//!
//! ## Fields
//!
//! - `snapshot_id`: UUIDv7 supplied by the caller
//! - `version`: `previous + 1`, starting at 1
//! - `log_cursor`: highest log sequence folded into this snapshot
//! - `artifact`: merged artifact with `version` set
//! - `stats`, `report`, `diff`: counts, validation result, log-segment diff
//! - `publishable`: `report.passed`
//! - `artifact_digest`: see [`compute_artifact_digest`]

use crate::config::ArtifexConfig;
use crate::diff::{compute_delta, SnapshotDelta};
use crate::errors::{ArtifexError, Result};
use crate::merge::{log_cursor, merge};
use crate::model::{Artifact, LogEntry};
use crate::rules::{Linter, ValidationReport};
use crate::snapshot::digest::compute_artifact_digest;
use crate::snapshot::stats::SnapshotStats;
use crate::snapshot::versioner::{boundaries, next_version, SnapshotLineage};
use artifex_core_types::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Immutable, numbered rendering of an artifact at compile time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledSnapshot {
    pub schema_version: u32,
    pub snapshot_id: String,
    pub session_id: SessionId,
    pub version: u32,
    pub compiled_at: DateTime<Utc>,
    pub log_cursor: u64,
    pub artifact: Artifact,
    pub stats: SnapshotStats,
    pub report: ValidationReport,
    pub diff: SnapshotDelta,
    pub publishable: bool,
    pub artifact_digest: String,
}

impl CompiledSnapshot {
    pub fn lineage(&self) -> SnapshotLineage {
        SnapshotLineage {
            version: self.version,
            log_cursor: self.log_cursor,
        }
    }
}

/// Inputs of one compile
///
/// `entries` is the log up to the cursor being compiled; `history` the
/// session's earlier snapshots in version order. Id and clock are inputs so
/// the step stays a pure function.
pub struct CompileRequest<'a> {
    pub session_id: &'a SessionId,
    pub entries: &'a [LogEntry],
    pub history: &'a [SnapshotLineage],
    pub config: &'a ArtifexConfig,
    pub linter: &'a Linter<'a>,
    pub snapshot_id: String,
    pub compiled_at: DateTime<Utc>,
}

/// Merge, lint, and freeze one snapshot
///
/// An artifact with error findings still compiles; it is marked
/// non-publishable.
///
/// # Errors
///
/// Version chain problems (`SnapshotChainBroken`, `CursorRegression`), a
/// corrupt log, or serialization failure of the digest.
pub fn compile_snapshot(request: CompileRequest<'_>) -> Result<CompiledSnapshot> {
    let version = next_version(request.history)?;
    let cursor = log_cursor(request.entries);
    let previous = request.history.last();
    if let Some(previous) = previous {
        if cursor < previous.log_cursor {
            return Err(ArtifexError::CursorRegression {
                cursor,
                previous: previous.log_cursor,
            });
        }
    }

    let outcome = merge(
        request.session_id,
        request.entries,
        &boundaries(request.history),
        &request.config.merge,
    )?;
    let lint = request.linter.lint(outcome.artifact());
    let diff = compute_delta(
        &outcome.applied,
        previous.map_or(0, |p| p.log_cursor),
        cursor,
        previous.map(|p| p.version),
    );

    let mut artifact = outcome.state.artifact;
    artifact.version = version;
    let report = ValidationReport::compile(outcome.violations, lint);
    let artifact_digest = compute_artifact_digest(&artifact)?;

    Ok(CompiledSnapshot {
        schema_version: SNAPSHOT_SCHEMA_VERSION,
        snapshot_id: request.snapshot_id,
        session_id: request.session_id.clone(),
        version,
        compiled_at: request.compiled_at,
        log_cursor: cursor,
        stats: SnapshotStats::compute(&artifact),
        publishable: report.passed,
        report,
        diff,
        artifact,
        artifact_digest,
    })
}
