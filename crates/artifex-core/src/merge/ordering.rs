//! Total order over log entries
//!
//! Entries sort by `(epoch, timestamp, sequence)`; operations inside an entry
//! keep their written order. Epochs are delimited by the log cursors of
//! previously compiled snapshots: everything at or below the first cursor is
//! epoch 0, and so on. A late message carrying an old timestamp therefore
//! sorts after everything an earlier snapshot already published, and ids
//! assigned in that snapshot never shift. With no snapshots there is a
//! single epoch and the order is plain `(timestamp, sequence)`.
//!
//! Replay is deterministic for a log together with its snapshot ledger, not
//! for the log alone: the same entries under different cursors can assign
//! different ids.

use crate::errors::{ArtifexError, Result};
use crate::model::LogEntry;
use std::collections::BTreeMap;

/// Epoch of a log sequence given ascending snapshot cursors
pub fn epoch_of(sequence: u64, boundaries: &[u64]) -> usize {
    boundaries.partition_point(|cursor| *cursor < sequence)
}

/// Sort entries into merge order
///
/// # Errors
///
/// `DuplicateSequence` if two entries share a sequence, `CursorRegression`
/// if `boundaries` is not strictly ascending.
pub fn merge_order<'a>(entries: &'a [LogEntry], boundaries: &[u64]) -> Result<Vec<&'a LogEntry>> {
    for pair in boundaries.windows(2) {
        if pair[1] <= pair[0] {
            return Err(ArtifexError::CursorRegression {
                cursor: pair[1],
                previous: pair[0],
            });
        }
    }

    let mut seen: BTreeMap<u64, &str> = BTreeMap::new();
    for entry in entries {
        if let Some(first) = seen.insert(entry.sequence, &entry.message_id) {
            return Err(ArtifexError::DuplicateSequence {
                sequence: entry.sequence,
                first: first.to_string(),
                second: entry.message_id.clone(),
            });
        }
    }

    let mut ordered: Vec<&LogEntry> = entries.iter().collect();
    ordered.sort_by_key(|entry| {
        (
            epoch_of(entry.sequence, boundaries),
            entry.timestamp,
            entry.sequence,
        )
    });
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifex_core_types::SessionId;
    use chrono::{DateTime, Utc};

    fn entry(sequence: u64, ts: &str) -> LogEntry {
        LogEntry {
            sequence,
            message_id: format!("m-{}", sequence),
            session_id: SessionId::new("s"),
            sender: "a".to_string(),
            subject: String::new(),
            timestamp: DateTime::parse_from_rfc3339(ts).unwrap().with_timezone(&Utc),
            operations: Vec::new(),
            parse_violations: Vec::new(),
        }
    }

    fn order(entries: &[LogEntry], boundaries: &[u64]) -> Vec<u64> {
        merge_order(entries, boundaries)
            .unwrap()
            .iter()
            .map(|e| e.sequence)
            .collect()
    }

    #[test]
    fn timestamp_then_sequence() {
        let entries = [
            entry(1, "2026-01-01T10:05:00Z"),
            entry(2, "2026-01-01T10:00:00Z"),
            entry(3, "2026-01-01T10:00:00Z"),
        ];
        assert_eq!(order(&entries, &[]), vec![2, 3, 1]);
    }

    #[test]
    fn late_arrival_sorts_after_compiled_prefix() {
        let entries = [
            entry(1, "2026-01-01T10:05:00Z"),
            entry(2, "2026-01-01T10:06:00Z"),
            entry(3, "2026-01-01T09:00:00Z"),
        ];
        assert_eq!(order(&entries, &[]), vec![3, 1, 2]);
        assert_eq!(order(&entries, &[2]), vec![1, 2, 3]);
    }

    #[test]
    fn epochs_from_cursors() {
        assert_eq!(epoch_of(1, &[2, 5]), 0);
        assert_eq!(epoch_of(2, &[2, 5]), 0);
        assert_eq!(epoch_of(3, &[2, 5]), 1);
        assert_eq!(epoch_of(6, &[2, 5]), 2);
    }

    #[test]
    fn duplicate_sequence_is_corruption() {
        let entries = [entry(1, "2026-01-01T10:00:00Z"), entry(1, "2026-01-01T10:01:00Z")];
        assert!(matches!(
            merge_order(&entries, &[]),
            Err(ArtifexError::DuplicateSequence { sequence: 1, .. })
        ));
    }

    #[test]
    fn boundaries_must_ascend() {
        assert!(matches!(
            merge_order(&[], &[4, 4]),
            Err(ArtifexError::CursorRegression { .. })
        ));
    }
}
