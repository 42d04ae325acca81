#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use artifex_core::errors::ExErrorKind;
use artifex_core::model::Section;
use artifex_core::ItemId;
use artifex_core_types::SessionId;
use common::{add, complete_artifact_body, hypothesis, kill, message, setup_engine};

fn id(raw: &str) -> ItemId {
    ItemId::parse(raw).unwrap()
}

#[test]
fn test_diff_spans_several_versions() {
    let (_tmp, engine) = setup_engine();
    let session = SessionId::new("s-1");
    engine
        .ingest_message(&message("s-1", "m-1", 0, &add("hypothesis_slate", hypothesis("A"))))
        .unwrap();
    engine.compile_session(&session).unwrap();
    engine
        .ingest_message(&message("s-1", "m-2", 10, &add("hypothesis_slate", hypothesis("B"))))
        .unwrap();
    engine.compile_session(&session).unwrap();
    engine
        .ingest_message(&message("s-1", "m-3", 20, &kill("hypothesis_slate", "H1", "refuted")))
        .unwrap();
    engine.compile_session(&session).unwrap();

    let delta = engine.diff_snapshots(&session, 1, 3).unwrap();
    let hypotheses = delta.section(Section::HypothesisSlate).unwrap();
    assert_eq!(hypotheses.added, vec![id("H2")]);
    assert_eq!(hypotheses.killed, vec![id("H1")]);
    assert_eq!(delta.previous_version, Some(1));

    let step = engine.diff_snapshots(&session, 2, 3).unwrap();
    assert!(step.section(Section::HypothesisSlate).unwrap().added.is_empty());
}

#[test]
fn test_diff_includes_late_arrival() {
    let (_tmp, engine) = setup_engine();
    let session = SessionId::new("s-1");
    engine
        .ingest_message(&message("s-1", "m-1", 100, &add("hypothesis_slate", hypothesis("A"))))
        .unwrap();
    engine.compile_session(&session).unwrap();
    // Timestamped before m-1 but recorded after the first snapshot.
    engine
        .ingest_message(&message("s-1", "m-2", 0, &add("hypothesis_slate", hypothesis("Early"))))
        .unwrap();
    let v2 = engine.compile_session(&session).unwrap();

    let delta = engine.diff_snapshots(&session, 1, 2).unwrap();
    assert_eq!(
        delta.section(Section::HypothesisSlate).unwrap().added,
        vec![id("H2")]
    );
    assert_eq!(delta, v2.snapshot.diff);
}

#[test]
fn test_diff_rejects_bad_ranges() {
    let (_tmp, engine) = setup_engine();
    let session = SessionId::new("s-1");
    engine
        .ingest_message(&message("s-1", "m-1", 0, &add("hypothesis_slate", hypothesis("A"))))
        .unwrap();
    engine.compile_session(&session).unwrap();

    let backwards = engine.diff_snapshots(&session, 1, 1).unwrap_err();
    assert_eq!(backwards.kind(), ExErrorKind::InvalidInput);
    let missing = engine.diff_snapshots(&session, 1, 2).unwrap_err();
    assert_eq!(missing.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_preview_reports_without_writing() {
    let (_tmp, engine) = setup_engine();
    let session = SessionId::new("s-1");
    engine
        .ingest_message(&message("s-1", "m-1", 0, &complete_artifact_body()))
        .unwrap();

    let mut body = String::from("```delta\n{not json\n```\n");
    body += &kill("hypothesis_slate", "H1", "first kill");
    body += &kill("hypothesis_slate", "H1", "second kill");
    body += &kill("anomaly_register", "X9", "no such item");
    let candidate = message("s-1", "m-2", 50, &body);

    let violations = engine.preview_message(&candidate).unwrap();
    let rules: Vec<&str> = violations.iter().map(|v| v.rule_id.as_str()).collect();
    assert_eq!(rules.first(), Some(&"W101"), "{:?}", rules);
    assert!(rules.contains(&"W203"), "{:?}", rules);
    assert!(rules.contains(&"W201"), "{:?}", rules);

    assert!(engine.snapshot_records(&session).unwrap().is_empty());
    let outcome = engine.compile_session(&session).unwrap();
    assert!(outcome.snapshot.publishable);
}
