//! Snapshot persistence operations.

#![allow(clippy::result_large_err)]

use crate::cas::FsStore;
use crate::errors::{from_rusqlite, serialization, version_conflict, Result};
use artifex_core::snapshot::CompiledSnapshot;
use artifex_core_types::SessionId;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, TransactionBehavior};

/// One row of the snapshot ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub snapshot_id: String,
    pub session_id: SessionId,
    pub version: u32,
    pub log_cursor: u64,
    pub artifact_digest: String,
    /// CAS digest of the snapshot JSON
    pub blob_digest: String,
    pub publishable: bool,
    pub published: bool,
    pub error_count: usize,
    pub compiled_at: DateTime<Utc>,
}

/// Write a snapshot's JSON to CAS and return the blob digest
///
/// ## Errors
///
/// - `ExErrorKind::Serialization`: JSON serialization failed
/// - `ExErrorKind::Io` / `Persistence`: CAS write failed
pub fn persist_snapshot_blob(store: &FsStore, snapshot: &CompiledSnapshot) -> Result<String> {
    let json = serde_json::to_vec_pretty(snapshot)
        .map_err(|e| serialization("persist_snapshot_blob", e))?;
    let digest = store.write(&json)?;

    tracing::debug!(
        digest = %digest,
        size_bytes = json.len(),
        "persisted snapshot blob"
    );
    Ok(digest)
}

/// Record a compiled snapshot in the ledger
///
/// The blob goes to CAS first (idempotent); the ledger row is inserted in an
/// immediate transaction that re-checks the session's next free version, so
/// two writers can never both claim a version.
///
/// ## Errors
///
/// - `ExErrorKind::VersionConflict`: `snapshot.version` is not the next free
///   version for its session
/// - `ExErrorKind::Persistence`: CAS or database error
pub fn persist_snapshot(
    conn: &mut Connection,
    cas_store: &FsStore,
    snapshot: &CompiledSnapshot,
    published: bool,
) -> Result<SnapshotRecord> {
    let blob_digest = persist_snapshot_blob(cas_store, snapshot)?;

    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;

    let current: i64 = tx
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM snapshots WHERE session_id = ?1",
            [snapshot.session_id.as_str()],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;
    let expected = current as u32 + 1;
    if snapshot.version != expected {
        return Err(version_conflict(&snapshot.session_id, snapshot.version, expected));
    }

    let record = SnapshotRecord {
        snapshot_id: snapshot.snapshot_id.clone(),
        session_id: snapshot.session_id.clone(),
        version: snapshot.version,
        log_cursor: snapshot.log_cursor,
        artifact_digest: snapshot.artifact_digest.clone(),
        blob_digest,
        publishable: snapshot.publishable,
        published: published && snapshot.publishable,
        error_count: snapshot.report.error_count,
        compiled_at: snapshot.compiled_at,
    };

    tx.execute(
        r#"
        INSERT INTO snapshots (
            snapshot_id, session_id, version, log_cursor, artifact_digest,
            blob_digest, publishable, published, error_count, compiled_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
        rusqlite::params![
            record.snapshot_id,
            record.session_id.as_str(),
            record.version,
            record.log_cursor as i64,
            record.artifact_digest,
            record.blob_digest,
            record.publishable,
            record.published,
            record.error_count as i64,
            record.compiled_at.timestamp_millis(),
        ],
    )
    .map_err(from_rusqlite)?;

    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(
        snapshot_id = %record.snapshot_id,
        session_id = %record.session_id,
        version = record.version,
        log_cursor = record.log_cursor,
        published = record.published,
        "created snapshot ledger entry"
    );

    Ok(record)
}
