//! Message ingestion

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, message_session_mismatch, serialization, Result};
use artifex_core::delta::parse_message;
use artifex_core::model::{Message, Violation};
use chrono::SecondsFormat;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

/// Result of appending one message
#[derive(Debug, Clone, PartialEq)]
pub struct AppendOutcome {
    /// Log sequence of the message
    pub sequence: u64,
    /// False when the message id was already recorded
    pub inserted: bool,
    /// Operations parsed from the body
    pub operation_count: usize,
    /// Parse rejections recorded with the message
    pub parse_violations: Vec<Violation>,
}

/// Parse `message` and record it with its operations in one transaction
///
/// Re-appending a known message id returns the recorded sequence and writes
/// nothing.
///
/// # Errors
///
/// Persistence failures, or a known message id arriving for another session.
pub fn append_message(conn: &mut Connection, message: &Message) -> Result<AppendOutcome> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;

    let existing: Option<(i64, String, String)> = tx
        .query_row(
            "SELECT seq, session_id, parse_violations_json FROM messages WHERE message_id = ?1",
            [&message.id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()
        .map_err(from_rusqlite)?;

    if let Some((seq, session, violations_json)) = existing {
        if session != message.session_id.as_str() {
            return Err(message_session_mismatch(&message.id, &session, &message.session_id));
        }
        let operation_count: i64 = tx
            .query_row(
                "SELECT COUNT(*) FROM operations WHERE message_seq = ?1",
                [seq],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;
        let parse_violations = serde_json::from_str(&violations_json)
            .map_err(|e| serialization("append_message", e))?;
        tracing::debug!(message_id = %message.id, seq, "message already recorded");
        return Ok(AppendOutcome {
            sequence: seq as u64,
            inserted: false,
            operation_count: operation_count as usize,
            parse_violations,
        });
    }

    let parsed = parse_message(&message.id, &message.body);
    let violations_json = serde_json::to_string(&parsed.violations)
        .map_err(|e| serialization("append_message", e))?;

    tx.execute(
        r#"
        INSERT INTO messages (
            message_id, session_id, sender, subject,
            timestamp, timestamp_ms, body, parse_violations_json, received_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
        rusqlite::params![
            message.id,
            message.session_id.as_str(),
            message.sender,
            message.subject,
            message.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            message.timestamp.timestamp_millis(),
            message.body,
            violations_json,
            chrono::Utc::now().timestamp_millis(),
        ],
    )
    .map_err(from_rusqlite)?;
    let seq = tx.last_insert_rowid();

    for (index, op) in parsed.operations.iter().enumerate() {
        let json = serde_json::to_string(op).map_err(|e| serialization("append_message", e))?;
        tx.execute(
            "INSERT INTO operations (message_seq, op_index, operation_json) VALUES (?1, ?2, ?3)",
            rusqlite::params![seq, index as i64, json],
        )
        .map_err(from_rusqlite)?;
    }

    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(
        message_id = %message.id,
        session_id = %message.session_id,
        seq,
        operations = parsed.operations.len(),
        rejected = parsed.violations.len(),
        "message appended"
    );

    Ok(AppendOutcome {
        sequence: seq as u64,
        inserted: true,
        operation_count: parsed.operations.len(),
        parse_violations: parsed.violations,
    })
}
