//! Merge engine: folds the ordered log into an artifact
//!
//! The artifact is a pure projection of `(config, session, log, cursors)`.
//! Rejected operations become violations and the fold continues; only a
//! corrupt log (foreign entries, duplicate sequences) fails the merge.

pub mod fields;
pub mod ordering;

use crate::apply::{apply, AppliedOp};
use crate::config::MergeConfig;
use crate::errors::{ArtifexError, Result};
use crate::ids::{IdAllocator, ItemId};
use crate::model::{Artifact, ArtifactStatus, Item, LogEntry, OpSource, Section, Violation};
use artifex_core_types::SessionId;

pub use ordering::{epoch_of, merge_order};

/// Artifact plus the allocator that produced its ids
#[derive(Debug, Clone, PartialEq)]
pub struct MergeState {
    pub artifact: Artifact,
    pub ids: IdAllocator,
}

impl MergeState {
    pub fn new(artifact: Artifact) -> Self {
        Self {
            artifact,
            ids: IdAllocator::new(),
        }
    }

    /// Resolve an id, killed items included
    pub fn lookup(&self, id: &ItemId) -> Option<&Item> {
        self.ids.lookup(&self.artifact, id)
    }
}

/// Everything one merge produces
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub state: MergeState,
    /// Applied operations in merge order
    pub applied: Vec<AppliedOp>,
    /// Parse and merge rejections in merge order
    pub violations: Vec<Violation>,
}

impl MergeOutcome {
    pub fn artifact(&self) -> &Artifact {
        &self.state.artifact
    }
}

/// Highest log sequence in `entries`, 0 for an empty log
pub fn log_cursor(entries: &[LogEntry]) -> u64 {
    entries.iter().map(|e| e.sequence).max().unwrap_or(0)
}

/// Fold a session's log into its artifact
///
/// `boundaries` are the log cursors of the session's earlier snapshots in
/// ascending order (see [`ordering`]).
///
/// # Errors
///
/// `ForeignSession`, `DuplicateSequence` or `CursorRegression` when the log
/// itself is malformed. Bad deltas never produce an error.
pub fn merge(
    session_id: &SessionId,
    entries: &[LogEntry],
    boundaries: &[u64],
    config: &MergeConfig,
) -> Result<MergeOutcome> {
    if let Some(foreign) = entries.iter().find(|e| e.session_id != *session_id) {
        return Err(ArtifexError::ForeignSession {
            message_id: foreign.message_id.clone(),
            expected: session_id.to_string(),
            found: foreign.session_id.to_string(),
        });
    }

    let ordered = merge_order(entries, boundaries)?;
    let mut state = MergeState::new(Artifact::new(session_id.clone()));
    let mut applied = Vec::new();
    let mut violations = Vec::new();
    let mut closed = false;

    state.artifact.created_at = ordered.first().map(|e| e.timestamp);

    for entry in ordered {
        violations.extend(entry.parse_violations.iter().cloned());
        for (index, op) in entry.operations.iter().enumerate() {
            let source = OpSource {
                message_id: entry.message_id.clone(),
                sender: entry.sender.clone(),
                timestamp: entry.timestamp,
                sequence: entry.sequence,
                index,
            };
            match apply(&mut state, op, &source, config) {
                Ok(done) => applied.push(done),
                Err(violation) => {
                    tracing::debug!(
                        session_id = %session_id,
                        message_id = %entry.message_id,
                        op_index = index,
                        rule_id = %violation.rule_id,
                        "operation rejected"
                    );
                    violations.push(violation);
                }
            }
        }
        closed |= entry.is_close();
    }

    state.artifact.status = if closed {
        ArtifactStatus::Closed
    } else if state.artifact.section(Section::ResearchThread).is_empty() {
        ArtifactStatus::Draft
    } else {
        ArtifactStatus::Active
    };

    Ok(MergeOutcome {
        state,
        applied,
        violations,
    })
}
