#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use artifex_core_types::SessionId;
use artifex_store::log::{append_message, read_log, read_session};
use artifex_store::snapshot::{
    latest_snapshot, load_snapshot, persist_snapshot, session_lineage, snapshot_by_version,
};
use common::*;

#[test]
fn test_persist_and_load_snapshot() {
    let (_dir, mut conn, cas) = setup_test_env();
    append_message(&mut conn, &message("s-1", "m-1", 0, &hypothesis_add("A"))).unwrap();
    let view = read_log(&conn, &SessionId::new("s-1"), None).unwrap();
    let snapshot = compile("s-1", &view.entries, &[]);

    let record = persist_snapshot(&mut conn, &cas, &snapshot, false).unwrap();

    assert_eq!(record.version, 1);
    assert_eq!(record.log_cursor, view.cursor);
    assert!(cas.contains(&record.blob_digest));
    let loaded = load_snapshot(&cas, &record).unwrap();
    assert_eq!(loaded, snapshot);
}

#[test]
fn test_unpublishable_snapshot_is_never_published() {
    let (_dir, mut conn, cas) = setup_test_env();
    let snapshot = compile("s-1", &[], &[]);
    assert!(!snapshot.publishable);

    let record = persist_snapshot(&mut conn, &cas, &snapshot, true).unwrap();

    assert!(!record.published);
    assert!(record.error_count > 0);
}

#[test]
fn test_version_must_be_next_free() {
    let (_dir, mut conn, cas) = setup_test_env();
    let first = compile("s-1", &[], &[]);
    persist_snapshot(&mut conn, &cas, &first, false).unwrap();

    // A second writer that compiled against the same (empty) history
    let stale = compile("s-1", &[], &[]);
    let err = persist_snapshot(&mut conn, &cas, &stale, false).unwrap_err();

    assert_eq!(err.code(), "ERR_VERSION_CONFLICT");
    assert_eq!(err.version(), Some(1));
}

#[test]
fn test_lineage_and_lookup() {
    let (_dir, mut conn, cas) = setup_test_env();
    let session = SessionId::new("s-1");
    append_message(&mut conn, &message("s-1", "m-1", 0, &hypothesis_add("A"))).unwrap();

    let first = compile("s-1", &read_log(&conn, &session, None).unwrap().entries, &[]);
    persist_snapshot(&mut conn, &cas, &first, false).unwrap();

    append_message(&mut conn, &message("s-1", "m-2", 10, &hypothesis_add("B"))).unwrap();
    let history = session_lineage(&conn, &session).unwrap();
    let second = compile("s-1", &read_log(&conn, &session, None).unwrap().entries, &history);
    persist_snapshot(&mut conn, &cas, &second, false).unwrap();

    let lineage = session_lineage(&conn, &session).unwrap();
    assert_eq!(lineage.iter().map(|l| l.version).collect::<Vec<_>>(), vec![1, 2]);
    assert!(lineage[0].log_cursor < lineage[1].log_cursor);

    assert_eq!(latest_snapshot(&conn, &session).unwrap().unwrap().version, 2);
    assert_eq!(
        snapshot_by_version(&conn, &session, 1).unwrap().unwrap().snapshot_id,
        first.snapshot_id
    );
    assert!(snapshot_by_version(&conn, &session, 9).unwrap().is_none());
    assert!(latest_snapshot(&conn, &SessionId::new("s-x")).unwrap().is_none());
}

#[test]
fn test_versions_are_per_session() {
    let (_dir, mut conn, cas) = setup_test_env();
    persist_snapshot(&mut conn, &cas, &compile("s-1", &[], &[]), false).unwrap();
    let other = persist_snapshot(&mut conn, &cas, &compile("s-2", &[], &[]), false).unwrap();
    assert_eq!(other.version, 1);
}

#[test]
fn test_read_session_pairs_lineage_with_full_log() {
    let (_dir, mut conn, cas) = setup_test_env();
    let session = SessionId::new("s-1");
    append_message(&mut conn, &message("s-1", "m-1", 0, &hypothesis_add("A"))).unwrap();
    let view = read_log(&conn, &session, None).unwrap();
    persist_snapshot(&mut conn, &cas, &compile("s-1", &view.entries, &[]), false).unwrap();
    append_message(&mut conn, &message("s-1", "m-2", 1, &hypothesis_add("B"))).unwrap();

    let combined = read_session(&conn, &session).unwrap();

    assert_eq!(combined.lineage.len(), 1);
    assert_eq!(combined.lineage[0].log_cursor, view.cursor);
    assert_eq!(combined.log.entries.len(), 2);
    assert!(combined.log.cursor > combined.lineage[0].log_cursor);
}
