//! Consistent reads of a session's log

#![allow(clippy::result_large_err)]

use crate::errors::{corrupt_row, from_rusqlite, Result};
use crate::snapshot::session_lineage;
use artifex_core::model::{LogEntry, Operation, Violation};
use artifex_core::snapshot::SnapshotLineage;
use artifex_core_types::SessionId;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

/// A session's log up to a fixed cursor
#[derive(Debug, Clone, PartialEq)]
pub struct LogView {
    /// Highest sequence in `entries`, 0 when empty
    pub cursor: u64,
    /// Entries in arrival order
    pub entries: Vec<LogEntry>,
}

/// Lineage and log of a session read at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub lineage: Vec<SnapshotLineage>,
    pub log: LogView,
}

struct MessageRow {
    seq: i64,
    message_id: String,
    sender: String,
    subject: String,
    timestamp: String,
    violations_json: String,
}

/// Read `session`'s log, optionally capped at `upto`
///
/// Cursor and entries come from one read transaction, so a concurrent
/// append is either fully visible or not at all.
///
/// # Errors
///
/// Persistence failures, or a stored row that no longer decodes.
pub fn read_log(conn: &Connection, session: &SessionId, upto: Option<u64>) -> Result<LogView> {
    let tx = conn.unchecked_transaction().map_err(from_rusqlite)?;
    let view = collect_log(&tx, session, upto)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok(view)
}

/// Read `session`'s snapshot lineage and full log in one read transaction
///
/// A compile or publish committed by another connection is either in both
/// halves or in neither.
///
/// # Errors
///
/// As [`read_log`].
pub fn read_session(conn: &Connection, session: &SessionId) -> Result<SessionView> {
    let tx = conn.unchecked_transaction().map_err(from_rusqlite)?;
    let lineage = session_lineage(&tx, session)?;
    let log = collect_log(&tx, session, None)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok(SessionView { lineage, log })
}

fn collect_log(conn: &Connection, session: &SessionId, upto: Option<u64>) -> Result<LogView> {
    let cap = upto.map_or(i64::MAX, |u| i64::try_from(u).unwrap_or(i64::MAX));

    let rows: Vec<MessageRow> = {
        let mut stmt = conn
            .prepare(
                r#"
                SELECT seq, message_id, sender, subject, timestamp, parse_violations_json
                FROM messages
                WHERE session_id = ?1 AND seq <= ?2
                ORDER BY seq
                "#,
            )
            .map_err(from_rusqlite)?;
        let mapped = stmt
            .query_map(rusqlite::params![session.as_str(), cap], |row| {
                Ok(MessageRow {
                    seq: row.get(0)?,
                    message_id: row.get(1)?,
                    sender: row.get(2)?,
                    subject: row.get(3)?,
                    timestamp: row.get(4)?,
                    violations_json: row.get(5)?,
                })
            })
            .map_err(from_rusqlite)?;
        let collected = mapped
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        collected
    };

    let mut entries = Vec::with_capacity(rows.len());
    {
        let mut ops_stmt = conn
            .prepare("SELECT operation_json FROM operations WHERE message_seq = ?1 ORDER BY op_index")
            .map_err(from_rusqlite)?;
        for row in rows {
            let operations = ops_stmt
                .query_map([row.seq], |r| r.get::<_, String>(0))
                .map_err(from_rusqlite)?
                .map(|json| {
                    let json = json.map_err(from_rusqlite)?;
                    serde_json::from_str::<Operation>(&json)
                        .map_err(|e| corrupt_row("read_log", &row.message_id, e))
                })
                .collect::<Result<Vec<_>>>()?;
            let parse_violations: Vec<Violation> = serde_json::from_str(&row.violations_json)
                .map_err(|e| corrupt_row("read_log", &row.message_id, e))?;
            let timestamp = DateTime::parse_from_rfc3339(&row.timestamp)
                .map_err(|e| corrupt_row("read_log", &row.message_id, e))?
                .with_timezone(&Utc);

            entries.push(LogEntry {
                sequence: row.seq as u64,
                message_id: row.message_id,
                session_id: session.clone(),
                sender: row.sender,
                subject: row.subject,
                timestamp,
                operations,
                parse_violations,
            });
        }
    }

    let cursor = entries.last().map_or(0, |e| e.sequence);
    Ok(LogView { cursor, entries })
}

/// Sessions with at least one recorded message, in lexical order
pub fn list_sessions(conn: &Connection) -> Result<Vec<SessionId>> {
    let mut stmt = conn
        .prepare("SELECT DISTINCT session_id FROM messages ORDER BY session_id")
        .map_err(from_rusqlite)?;
    let sessions = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(from_rusqlite)?
        .map(|s| s.map(SessionId::new).map_err(from_rusqlite))
        .collect::<Result<Vec<_>>>()?;
    Ok(sessions)
}
