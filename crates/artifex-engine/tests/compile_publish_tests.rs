#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use artifex_core::errors::ExErrorKind;
use artifex_core::ArtifactStatus;
use artifex_core_types::SessionId;
use common::{add, complete_artifact_body, hypothesis, kill, message, setup_engine};

#[test]
fn test_compile_assigns_consecutive_versions() {
    let (_tmp, engine) = setup_engine();
    let session = SessionId::new("s-1");
    engine
        .ingest_message(&message("s-1", "m-1", 0, &add("hypothesis_slate", hypothesis("A"))))
        .unwrap();

    let v1 = engine.compile_session(&session).unwrap();
    engine
        .ingest_message(&message("s-1", "m-2", 10, &add("hypothesis_slate", hypothesis("B"))))
        .unwrap();
    let v2 = engine.compile_session(&session).unwrap();

    assert_eq!(v1.record.version, 1);
    assert_eq!(v2.record.version, 2);
    assert!(v2.record.log_cursor > v1.record.log_cursor);
    assert_eq!(v2.snapshot.diff.previous_version, Some(1));
    assert_eq!(v2.snapshot.diff.total_changes(), 1);
}

#[test]
fn test_compile_without_messages_is_not_found() {
    let (_tmp, engine) = setup_engine();
    let err = engine.compile_session(&SessionId::new("ghost")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_compile_is_stored_and_reloadable() {
    let (_tmp, engine) = setup_engine();
    let session = SessionId::new("s-1");
    engine
        .ingest_message(&message("s-1", "m-1", 0, &complete_artifact_body()))
        .unwrap();

    let outcome = engine.compile_session(&session).unwrap();
    let loaded = engine.snapshot(&session, 1).unwrap();
    assert_eq!(loaded, outcome.snapshot);
    assert_eq!(
        engine.latest_snapshot(&session).unwrap().unwrap().snapshot_id,
        outcome.record.snapshot_id
    );
    assert!(!outcome.record.published);
}

#[test]
fn test_publish_marks_clean_snapshot_published() {
    let (_tmp, engine) = setup_engine();
    let session = SessionId::new("s-1");
    engine
        .ingest_message(&message("s-1", "m-1", 0, &complete_artifact_body()))
        .unwrap();

    let outcome = engine.publish_session(&session).unwrap();
    assert!(outcome.snapshot.publishable);
    assert!(outcome.record.published);
    assert_eq!(outcome.snapshot.artifact.status, ArtifactStatus::Active);
}

#[test]
fn test_publish_blocked_still_persists_snapshot() {
    let (_tmp, engine) = setup_engine();
    let session = SessionId::new("s-1");
    let mut body = complete_artifact_body();
    body += &kill("hypothesis_slate", "H2", "ruled out by bench test");
    engine.ingest_message(&message("s-1", "m-1", 0, &body)).unwrap();

    let err = engine.publish_session(&session).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::PublishBlocked);
    assert_eq!(err.version(), Some(1));

    let records = engine.snapshot_records(&session).unwrap();
    assert_eq!(records.len(), 1);
    assert!(!records[0].publishable);
    assert!(!records[0].published);
    let stored = engine.snapshot(&session, 1).unwrap();
    assert!(stored.report.has_rule("E003"));
}

#[test]
fn test_missing_version_is_not_found() {
    let (_tmp, engine) = setup_engine();
    let err = engine.snapshot(&SessionId::new("s-1"), 3).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.version(), Some(3));
}
