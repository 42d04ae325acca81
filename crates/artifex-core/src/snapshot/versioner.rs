//! Version chain rules
//!
//! Versions run 1, 2, 3, ... per session with no gaps; each snapshot's log
//! cursor is at least its predecessor's. The store enforces uniqueness
//! under concurrency, this module checks the chain is sound and derives the
//! next number from it.

use crate::errors::{ArtifexError, Result};
use serde::{Deserialize, Serialize};

/// What later compiles need to know about an earlier snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLineage {
    pub version: u32,
    pub log_cursor: u64,
}

/// Next version after `history` (ascending by version)
///
/// # Errors
///
/// `SnapshotChainBroken` if versions are not exactly 1..=n,
/// `CursorRegression` if a cursor moves backwards.
pub fn next_version(history: &[SnapshotLineage]) -> Result<u32> {
    let mut previous_cursor = 0;
    for (expected, lineage) in (1u32..).zip(history) {
        if lineage.version != expected {
            return Err(ArtifexError::SnapshotChainBroken {
                expected,
                found: lineage.version,
            });
        }
        if lineage.log_cursor < previous_cursor {
            return Err(ArtifexError::CursorRegression {
                cursor: lineage.log_cursor,
                previous: previous_cursor,
            });
        }
        previous_cursor = lineage.log_cursor;
    }
    u32::try_from(history.len() + 1).map_err(|_| ArtifexError::Internal {
        message: "snapshot version overflow".to_string(),
    })
}

/// Distinct cursors of `history`, ascending: the merge epoch boundaries.
/// Recompiling without new messages repeats a cursor; it counts once.
pub fn boundaries(history: &[SnapshotLineage]) -> Vec<u64> {
    let mut cursors: Vec<u64> = history.iter().map(|l| l.log_cursor).collect();
    cursors.dedup();
    cursors
}
