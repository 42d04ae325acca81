//! Snapshot and session lookups

#![allow(clippy::result_large_err)]

use crate::engine::Engine;
use artifex_core::errors::{ExError, ExErrorKind};
use artifex_core::snapshot::CompiledSnapshot;
use artifex_core_types::SessionId;
use artifex_store::log::list_sessions;
use artifex_store::snapshot::{
    latest_snapshot, load_snapshot, snapshot_by_version, snapshot_records, SnapshotRecord,
};
use artifex_store::Result;

impl Engine {
    pub fn sessions(&self) -> Result<Vec<SessionId>> {
        list_sessions(&self.connect()?)
    }

    /// Ledger rows of a session, by version
    pub fn snapshot_records(&self, session: &SessionId) -> Result<Vec<SnapshotRecord>> {
        snapshot_records(&self.connect()?, session)
    }

    /// Newest snapshot of a session, published or not
    pub fn latest_snapshot(&self, session: &SessionId) -> Result<Option<CompiledSnapshot>> {
        let conn = self.connect()?;
        match latest_snapshot(&conn, session)? {
            Some(record) => load_snapshot(self.cas(), &record).map(Some),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// `NotFound` when the session has no such version.
    pub fn snapshot(&self, session: &SessionId, version: u32) -> Result<CompiledSnapshot> {
        let conn = self.connect()?;
        let record = snapshot_by_version(&conn, session, version)?
            .ok_or_else(|| missing_version(session, version))?;
        load_snapshot(self.cas(), &record)
    }
}

pub(crate) fn missing_version(session: &SessionId, version: u32) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("load_snapshot")
        .with_session_id(session.clone())
        .with_version(version)
        .with_message("no snapshot with this version")
}
