//! Snapshot compilation domain logic
//!
//! ## Responsibilities
//!
//! - Freeze a merge result into a `CompiledSnapshot`
//! - Compute deterministic artifact digests and per-section statistics
//! - Validate the version chain and derive the next version
//!
//! ## Non-Responsibilities
//!
//! - Persistence and version assignment races (handled by `artifex-store`)
//! - Per-session serialization (handled by `artifex-engine`)

pub mod digest;
pub mod manifest;
pub mod stats;
pub mod versioner;

pub use digest::{compute_artifact_digest, hash_bytes};
pub use manifest::{compile_snapshot, CompileRequest, CompiledSnapshot, SNAPSHOT_SCHEMA_VERSION};
pub use stats::{SectionStats, SnapshotStats};
pub use versioner::{boundaries, next_version, SnapshotLineage};
