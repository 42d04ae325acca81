#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use artifex_core::model::{Section, Severity};
use artifex_core::parse_message;
use common::*;

fn mixed_body() -> String {
    format!(
        "Two proposals.\n\n```delta\n{{\"operation\": \"ADD\", \"section\": \n```\n\n{}",
        add("hypothesis_slate", hypothesis("Thermal"))
    )
}

#[test]
fn test_valid_block_merges_beside_invalid_block() {
    let outcome = merge_log(&log(&[("alice", 0, mixed_body())]));

    assert_eq!(outcome.artifact().section(Section::HypothesisSlate).len(), 1);
    assert_eq!(outcome.violations.len(), 1);
    let violation = &outcome.violations[0];
    assert_eq!(violation.rule_id, "W101");
    assert_eq!(violation.severity, Severity::Warning);
    assert_eq!(violation.location.block, Some(1));
}

#[test]
fn test_parse_outcome_reports_one_violation() {
    let parsed = parse_message("m-1", &mixed_body());
    assert_eq!(parsed.operations.len(), 1);
    assert_eq!(parsed.violations.len(), 1);
}

#[test]
fn test_non_delta_code_blocks_are_ignored() {
    let body = format!(
        "```json\n{{\"operation\": \"KILL\"}}\n```\n{}",
        add("hypothesis_slate", hypothesis("Thermal"))
    );
    let parsed = parse_message("m-1", &body);
    assert_eq!(parsed.operations.len(), 1);
    assert!(parsed.violations.is_empty());
}

#[test]
fn test_parse_rejection_does_not_block_publish() {
    let body = format!(
        "{}```delta\nnot json\n```\n",
        complete_artifact_body()
    );
    let snapshot = compile(&log(&[("alice", 0, body)]), &[], &artifex_core::ArtifexConfig::default());

    assert!(snapshot.report.has_rule("W101"));
    assert_eq!(snapshot.report.error_count, 0);
    assert!(snapshot.publishable);
}
