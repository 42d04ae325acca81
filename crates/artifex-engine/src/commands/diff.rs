//! Diff between two recorded versions of a session

#![allow(clippy::result_large_err)]

use crate::commands::query::missing_version;
use crate::engine::Engine;
use artifex_core::diff::{compute_delta, SnapshotDelta};
use artifex_core::errors::{ExError, ExErrorKind};
use artifex_core::merge::merge;
use artifex_core::snapshot::boundaries;
use artifex_core::{log_op_end, log_op_error, log_op_start};
use artifex_core_types::SessionId;
use artifex_store::log::read_log;
use artifex_store::snapshot::session_lineage;
use artifex_store::Result;
use std::time::Instant;

impl Engine {
    /// Changes between snapshot `from` and snapshot `to`
    ///
    /// The log is re-merged exactly as it was for `to` (entries up to its
    /// cursor, ordered by the boundaries that existed then), and every
    /// applied operation past `from`'s cursor is summarized. Late arrivals
    /// folded into `to` are included.
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless `from < to`, `NotFound` for an unknown version.
    pub fn diff_snapshots(
        &self,
        session: &SessionId,
        from: u32,
        to: u32,
    ) -> Result<SnapshotDelta> {
        log_op_start!("diff_snapshots", session_id = %session, from, to);
        let start = Instant::now();

        let result = self.diff_impl(session, from, to).map_err(|e| {
            log_op_error!(
                "diff_snapshots",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "diff_snapshots",
            duration_ms = start.elapsed().as_millis() as u64,
            changes = result.total_changes()
        );
        Ok(result)
    }

    fn diff_impl(&self, session: &SessionId, from: u32, to: u32) -> Result<SnapshotDelta> {
        if from >= to {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("diff_snapshots")
                .with_session_id(session.clone())
                .with_message(format!("from ({}) must precede to ({})", from, to)));
        }
        let conn = self.connect()?;
        let history = session_lineage(&conn, session)?;
        let find = |version: u32| {
            history
                .iter()
                .position(|l| l.version == version)
                .ok_or_else(|| missing_version(session, version))
        };
        let from_at = find(from)?;
        let to_at = find(to)?;

        let view = read_log(&conn, session, Some(history[to_at].log_cursor))?;
        let outcome = merge(
            session,
            &view.entries,
            &boundaries(&history[..to_at]),
            &self.config().merge,
        )
        .map_err(|e| ExError::from(e).with_session_id(session.clone()))?;

        Ok(compute_delta(
            &outcome.applied,
            history[from_at].log_cursor,
            history[to_at].log_cursor,
            Some(from),
        ))
    }
}
