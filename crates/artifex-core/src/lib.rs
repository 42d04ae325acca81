//! Artifex Core - deterministic artifact compilation engine
//!
//! Pure, synchronous pipeline over one session's operation log:
//! - Delta parser: fenced `delta` blocks → operations or rejections
//! - ID allocator: per-section monotonic ids that are never reused
//! - Merge engine: ordered fold of the log into an `Artifact`
//! - Linter: rule catalog with stable ids and severities
//! - Snapshot/versioner: numbered, immutable compiled snapshots with diffs
//!
//! No I/O happens here besides reading a config file; persistence lives in
//! `artifex-store` and orchestration in `artifex-engine`.

pub use artifex_core_types;

pub mod apply;
pub mod config;
pub mod delta;
pub mod diff;
pub mod errors;
pub mod ids;
pub mod logging_facility;
pub mod merge;
pub mod model;
pub mod render;
pub mod rules;
pub mod snapshot;

// Re-export commonly used types
pub use apply::{apply, AppliedOp};
pub use config::{ArtifexConfig, LintConfig, LoggingConfig, MergeConfig};
pub use delta::{parse_message, ParseOutcome};
pub use errors::{ArtifexError, ExError, ExErrorKind, Result};
pub use ids::{IdAllocator, ItemId};
pub use merge::{merge, MergeOutcome, MergeState};
pub use model::{
    Artifact, ArtifactStatus, Item, ItemState, LogEntry, Message, OpKind, Operation, Section,
    Severity, Violation,
};
pub use rules::{Linter, RuleCatalog, ValidationReport};
pub use snapshot::{compile_snapshot, CompileRequest, CompiledSnapshot, SnapshotLineage};
