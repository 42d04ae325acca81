#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use artifex_core::logging_facility::test_capture::init_test_capture;
use artifex_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use artifex_core_types::SessionId;
use common::{add, hypothesis, message, setup_engine};

#[test]
fn test_compile_emits_start_and_end() {
    let capture = init_test_capture();
    let (_tmp, engine) = setup_engine();
    let session = SessionId::new("s-logging-compile");
    engine
        .ingest_message(&message(
            "s-logging-compile",
            "log-m-1",
            0,
            &add("hypothesis_slate", hypothesis("A")),
        ))
        .unwrap();
    engine.compile_session(&session).unwrap();

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some("compile_session")
            && e.event.as_deref() == Some(EVENT_START)
            && e.field("session_id") == Some("s-logging-compile")
    });
    assert_eq!(starts, 1);

    let ends = capture.count_events(|e| {
        e.op.as_deref() == Some("compile_session")
            && e.event.as_deref() == Some(EVENT_END)
            && e.field("version") == Some("1")
    });
    assert!(ends >= 1);
}

#[test]
fn test_failed_publish_logs_error_code() {
    let capture = init_test_capture();
    let (_tmp, engine) = setup_engine();
    let session = SessionId::new("s-logging-blocked");
    engine
        .ingest_message(&message(
            "s-logging-blocked",
            "log-m-2",
            0,
            &add("hypothesis_slate", hypothesis("Only")),
        ))
        .unwrap();
    engine.publish_session(&session).unwrap_err();

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some("publish_session")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field("err.code") == Some("ERR_PUBLISH_BLOCKED")
    });
    assert_eq!(errors, 1);
    capture.assert_event_exists("ingest_message", EVENT_START);
}
