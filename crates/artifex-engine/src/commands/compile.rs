//! Compile and publish
//!
//! ## Versioning
//!
//! A compile holds the session lock from reading the lineage until the
//! ledger row is written, so in-process compiles of one session get
//! versions 1, 2, 3, ... in lock order. Another process writing the same
//! store is caught by the ledger's version check (`VersionConflict`); the
//! compile then re-reads the lineage and tries again.

#![allow(clippy::result_large_err)]

use crate::engine::{hold, Engine};
use crate::resolver::StoreResolver;
use artifex_core::errors::{ArtifexError, ExError, ExErrorKind};
use artifex_core::snapshot::{compile_snapshot, CompileRequest, CompiledSnapshot};
use artifex_core::{log_op_end, log_op_error, log_op_start, Linter};
use artifex_core_types::SessionId;
use artifex_store::log::read_session;
use artifex_store::snapshot::{persist_snapshot, SnapshotRecord};
use artifex_store::Result;
use chrono::Utc;
use rusqlite::Connection;
use std::time::Instant;

const MAX_VERSION_ATTEMPTS: usize = 3;

/// A persisted compile
#[derive(Debug, Clone)]
pub struct CompileOutcome {
    pub snapshot: CompiledSnapshot,
    pub record: SnapshotRecord,
}

impl Engine {
    /// Compile the session's full log into its next snapshot version
    ///
    /// An artifact with errors still gets a version; it is recorded as not
    /// publishable.
    ///
    /// # Errors
    ///
    /// `NotFound` for a session with no messages, `CorruptLog` for a log
    /// that violates ordering invariants, persistence failures.
    pub fn compile_session(&self, session: &SessionId) -> Result<CompileOutcome> {
        log_op_start!("compile_session", session_id = %session);
        let start = Instant::now();

        let result = self.compile_locked(session, false).map_err(|e| {
            log_op_error!(
                "compile_session",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "compile_session",
            duration_ms = start.elapsed().as_millis() as u64,
            version = result.record.version,
            log_cursor = result.record.log_cursor,
            publishable = result.record.publishable
        );
        Ok(result)
    }

    /// Compile and mark the new snapshot published
    ///
    /// # Errors
    ///
    /// `PublishBlocked` (carrying the version) when the snapshot has
    /// error-severity findings. That snapshot is still persisted, unpublished,
    /// and can be loaded for review. Otherwise as [`Engine::compile_session`].
    pub fn publish_session(&self, session: &SessionId) -> Result<CompileOutcome> {
        log_op_start!("publish_session", session_id = %session);
        let start = Instant::now();

        let result = self
            .compile_locked(session, true)
            .and_then(|outcome| {
                if outcome.record.published {
                    Ok(outcome)
                } else {
                    Err(ExError::from(ArtifexError::PublishBlocked {
                        version: outcome.record.version,
                        error_count: outcome.record.error_count,
                    })
                    .with_session_id(session.clone()))
                }
            })
            .map_err(|e| {
                log_op_error!(
                    "publish_session",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

        log_op_end!(
            "publish_session",
            duration_ms = start.elapsed().as_millis() as u64,
            version = result.record.version,
            snapshot_id = %result.record.snapshot_id
        );
        Ok(result)
    }

    fn compile_locked(&self, session: &SessionId, publish: bool) -> Result<CompileOutcome> {
        let lock = self.session_lock(session)?;
        let _guard = hold(&lock, session)?;
        let mut conn = self.connect()?;

        let mut attempt = 1;
        loop {
            match self.compile_once(&mut conn, session, publish) {
                Err(err)
                    if err.kind() == ExErrorKind::VersionConflict
                        && attempt < MAX_VERSION_ATTEMPTS =>
                {
                    tracing::warn!(
                        session_id = %session,
                        attempt,
                        error = %err,
                        "version taken by another writer, recompiling"
                    );
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    fn compile_once(
        &self,
        conn: &mut Connection,
        session: &SessionId,
        publish: bool,
    ) -> Result<CompileOutcome> {
        let read = read_session(conn, session)?;
        let (history, view) = (read.lineage, read.log);
        if view.entries.is_empty() {
            return Err(ExError::new(ExErrorKind::NotFound)
                .with_op("compile_session")
                .with_session_id(session.clone())
                .with_message("no messages recorded for session"));
        }

        let snapshot = {
            let resolver = StoreResolver::new(conn, self.cas());
            let linter = Linter::new(self.catalog(), &self.config().lint, &resolver);
            compile_snapshot(CompileRequest {
                session_id: session,
                entries: &view.entries,
                history: &history,
                config: self.config(),
                linter: &linter,
                snapshot_id: uuid::Uuid::now_v7().to_string(),
                compiled_at: Utc::now(),
            })
            .map_err(|e| ExError::from(e).with_session_id(session.clone()))?
        };

        let record = persist_snapshot(conn, self.cas(), &snapshot, publish)?;
        Ok(CompileOutcome { snapshot, record })
    }
}
