//! Message and transcript ingestion

#![allow(clippy::result_large_err)]

use crate::engine::Engine;
use artifex_core::model::Message;
use artifex_core::{log_op_end, log_op_error, log_op_start};
use artifex_core_types::SessionId;
use artifex_store::log::{append_message, AppendOutcome};
use artifex_store::transcript::parse_transcript_file;
use artifex_store::Result;
use std::path::Path;
use std::time::Instant;

/// Totals of one transcript import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    pub session_id: SessionId,
    pub appended: usize,
    pub duplicates: usize,
    pub operations: usize,
    pub rejected_blocks: usize,
}

impl Engine {
    /// Append one message to its session's log
    ///
    /// Does not take the session lock: appends never wait for a compile,
    /// and a compile sees either all of a message or none of it.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the message id is already recorded for another
    /// session; persistence failures.
    pub fn ingest_message(&self, message: &Message) -> Result<AppendOutcome> {
        log_op_start!(
            "ingest_message",
            session_id = %message.session_id,
            message_id = %message.id
        );
        let start = Instant::now();

        let result = self
            .connect()
            .and_then(|mut conn| append_message(&mut conn, message))
            .map_err(|e| {
                log_op_error!(
                    "ingest_message",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

        log_op_end!(
            "ingest_message",
            duration_ms = start.elapsed().as_millis() as u64,
            sequence = result.sequence,
            inserted = result.inserted,
            operation_count = result.operation_count
        );
        Ok(result)
    }

    /// Import every message of a transcript file, in file order
    ///
    /// # Errors
    ///
    /// `InvalidTranscript` when the file does not parse; the first failing
    /// append otherwise. Messages appended before a failure stay appended.
    pub fn ingest_transcript(&self, path: &Path) -> Result<IngestSummary> {
        let transcript = parse_transcript_file(path)?;
        let mut summary = IngestSummary {
            session_id: transcript.session(),
            appended: 0,
            duplicates: 0,
            operations: 0,
            rejected_blocks: 0,
        };
        for message in transcript.to_messages() {
            let outcome = self.ingest_message(&message)?;
            if outcome.inserted {
                summary.appended += 1;
                summary.operations += outcome.operation_count;
                summary.rejected_blocks += outcome.parse_violations.len();
            } else {
                summary.duplicates += 1;
            }
        }
        tracing::info!(
            session_id = %summary.session_id,
            appended = summary.appended,
            duplicates = summary.duplicates,
            "transcript ingested"
        );
        Ok(summary)
    }
}
