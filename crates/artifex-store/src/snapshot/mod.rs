//! Snapshot persistence layer.
//!
//! Compiled snapshots are written to content-addressable storage and
//! indexed by the `snapshots` ledger.
//!
//! ## Responsibilities
//!
//! - Persist snapshot JSON to CAS
//! - Create ledger rows under `UNIQUE(session_id, version)`
//! - Reject a version that is not the session's next free one
//! - Query lineage, latest, and by-version records
//!
//! ## Non-Responsibilities
//!
//! - Compiling snapshots (handled by `artifex-core`)
//! - Orchestration (handled by `artifex-engine`)

pub mod persist;
pub mod query;

pub use persist::{persist_snapshot, persist_snapshot_blob, SnapshotRecord};
pub use query::{
    latest_snapshot, load_snapshot, session_lineage, snapshot_by_version, snapshot_records,
};
