#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use artifex_core::model::{ItemState, Section};
use artifex_core::ItemId;
use common::*;

#[test]
fn test_three_adds_in_one_message_get_sequential_ids() {
    let body = format!(
        "{}{}{}",
        add("hypothesis_slate", hypothesis("Thermal")),
        add("hypothesis_slate", hypothesis("Mechanical")),
        add("hypothesis_slate", hypothesis("Firmware")),
    );
    let entries = log(&[("alice", 0, body)]);
    let outcome = merge_log(&entries);

    let slate = outcome.artifact().section(Section::HypothesisSlate);
    let ids: Vec<String> = slate.iter().map(|h| h.id.to_string()).collect();
    assert_eq!(ids, vec!["H1", "H2", "H3"]);
    assert!(slate.iter().all(|h| h.state == ItemState::Active));
    assert!(outcome.violations.is_empty());
}

#[test]
fn test_items_keep_payload_order_within_message() {
    let body = format!(
        "{}{}",
        add("hypothesis_slate", hypothesis("First")),
        add("hypothesis_slate", hypothesis("Second")),
    );
    let outcome = merge_log(&log(&[("alice", 0, body)]));
    let artifact = outcome.artifact();

    let h1 = artifact.find(&ItemId::parse("H1").unwrap()).unwrap();
    let h2 = artifact.find(&ItemId::parse("H2").unwrap()).unwrap();
    assert_eq!(h1.text_field("name"), Some("First"));
    assert_eq!(h2.text_field("name"), Some("Second"));
    assert_eq!(h1.created_by, "m-1");
}

#[test]
fn test_ids_are_numbered_per_section() {
    let body = format!(
        "{}{}{}",
        add("hypothesis_slate", hypothesis("Thermal")),
        add(
            "anomaly_register",
            serde_json::json!({"name": "Spike", "observation": "spike", "anchors": ["§3"]})
        ),
        add("hypothesis_slate", hypothesis("Mechanical")),
    );
    let outcome = merge_log(&log(&[("alice", 0, body)]));
    let artifact = outcome.artifact();

    assert_eq!(artifact.section(Section::AnomalyRegister)[0].id.to_string(), "X1");
    assert_eq!(artifact.section(Section::HypothesisSlate)[1].id.to_string(), "H2");
    assert!(artifact.contributors.contains("alice"));
}
