//! Read-only snapshot ledger queries

#![allow(clippy::result_large_err)]

use crate::cas::FsStore;
use crate::errors::{corrupt_row, from_rusqlite, Result};
use crate::snapshot::persist::SnapshotRecord;
use artifex_core::snapshot::{CompiledSnapshot, SnapshotLineage};
use artifex_core_types::SessionId;
use chrono::DateTime;
use rusqlite::{Connection, OptionalExtension, Row};

const RECORD_COLUMNS: &str = "snapshot_id, session_id, version, log_cursor, artifact_digest, \
     blob_digest, publishable, published, error_count, compiled_at";

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<SnapshotRecord> {
    let compiled_ms: i64 = row.get(9)?;
    Ok(SnapshotRecord {
        snapshot_id: row.get(0)?,
        session_id: SessionId::new(row.get::<_, String>(1)?),
        version: row.get(2)?,
        log_cursor: row.get::<_, i64>(3)? as u64,
        artifact_digest: row.get(4)?,
        blob_digest: row.get(5)?,
        publishable: row.get(6)?,
        published: row.get(7)?,
        error_count: row.get::<_, i64>(8)? as usize,
        compiled_at: DateTime::from_timestamp_millis(compiled_ms).unwrap_or_default(),
    })
}

/// All ledger rows for a session in version order
pub fn snapshot_records(conn: &Connection, session: &SessionId) -> Result<Vec<SnapshotRecord>> {
    let sql = format!(
        "SELECT {} FROM snapshots WHERE session_id = ?1 ORDER BY version",
        RECORD_COLUMNS
    );
    let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
    let records = stmt
        .query_map([session.as_str()], record_from_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(records)
}

/// Version chain of a session, as the compiler consumes it
pub fn session_lineage(conn: &Connection, session: &SessionId) -> Result<Vec<SnapshotLineage>> {
    Ok(snapshot_records(conn, session)?
        .into_iter()
        .map(|r| SnapshotLineage {
            version: r.version,
            log_cursor: r.log_cursor,
        })
        .collect())
}

pub fn latest_snapshot(conn: &Connection, session: &SessionId) -> Result<Option<SnapshotRecord>> {
    let sql = format!(
        "SELECT {} FROM snapshots WHERE session_id = ?1 ORDER BY version DESC LIMIT 1",
        RECORD_COLUMNS
    );
    conn.query_row(&sql, [session.as_str()], record_from_row)
        .optional()
        .map_err(from_rusqlite)
}

pub fn snapshot_by_version(
    conn: &Connection,
    session: &SessionId,
    version: u32,
) -> Result<Option<SnapshotRecord>> {
    let sql = format!(
        "SELECT {} FROM snapshots WHERE session_id = ?1 AND version = ?2",
        RECORD_COLUMNS
    );
    conn.query_row(&sql, rusqlite::params![session.as_str(), version], record_from_row)
        .optional()
        .map_err(from_rusqlite)
}

/// Fetch and decode the snapshot blob a record points at
pub fn load_snapshot(cas: &FsStore, record: &SnapshotRecord) -> Result<CompiledSnapshot> {
    let bytes = cas.read(&record.blob_digest)?;
    serde_json::from_slice(&bytes).map_err(|e| corrupt_row("load_snapshot", &record.snapshot_id, e))
}
