#![allow(dead_code)]

use artifex_core::model::{LogEntry, Message};
use artifex_core::rules::{Linter, NoopResolver, RuleCatalog};
use artifex_core::snapshot::{compile_snapshot, CompileRequest, CompiledSnapshot, SnapshotLineage};
use artifex_core::{merge, ArtifexConfig, MergeOutcome};
use artifex_core_types::SessionId;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

pub const SESSION: &str = "session-test";

/// Base timestamp for test messages; offsets are in seconds
pub fn at(offset_secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap() + Duration::seconds(offset_secs)
}

/// Wrap a JSON delta in a fenced `delta` block
pub fn block(delta: Value) -> String {
    format!("```delta\n{}\n```\n", delta)
}

pub fn add(section: &str, payload: Value) -> String {
    block(serde_json::json!({
        "operation": "ADD",
        "section": section,
        "target_id": null,
        "payload": payload,
    }))
}

pub fn edit(section: &str, target: &str, payload: Value) -> String {
    block(serde_json::json!({
        "operation": "EDIT",
        "section": section,
        "target_id": target,
        "payload": payload,
    }))
}

pub fn kill(section: &str, target: &str, reason: &str) -> String {
    block(serde_json::json!({
        "operation": "KILL",
        "section": section,
        "target_id": target,
        "payload": {"reason": reason},
    }))
}

pub fn hypothesis(name: &str) -> Value {
    serde_json::json!({"name": name, "claim": format!("{} explains the drift", name), "anchors": ["§12"]})
}

pub fn message(id: &str, sender: &str, offset_secs: i64, body: &str) -> Message {
    Message {
        id: id.to_string(),
        sender: sender.to_string(),
        timestamp: at(offset_secs),
        session_id: SessionId::new(SESSION),
        subject: "delta".to_string(),
        body: body.to_string(),
    }
}

/// Build a log from `(sender, offset, body)` triples; sequence follows
/// slice order starting at 1
pub fn log(messages: &[(&str, i64, String)]) -> Vec<LogEntry> {
    messages
        .iter()
        .enumerate()
        .map(|(i, (sender, offset, body))| {
            let seq = i as u64 + 1;
            LogEntry::from_message(&message(&format!("m-{}", seq), sender, *offset, body), seq)
        })
        .collect()
}

pub fn merge_log(entries: &[LogEntry]) -> MergeOutcome {
    merge(
        &SessionId::new(SESSION),
        entries,
        &[],
        &ArtifexConfig::default().merge,
    )
    .unwrap()
}

pub fn compile(
    entries: &[LogEntry],
    history: &[SnapshotLineage],
    config: &ArtifexConfig,
) -> CompiledSnapshot {
    let catalog = RuleCatalog::standard();
    let linter = Linter::new(&catalog, &config.lint, &NoopResolver);
    compile_snapshot(CompileRequest {
        session_id: &SessionId::new(SESSION),
        entries,
        history,
        config,
        linter: &linter,
        snapshot_id: format!("snap-{}", history.len() + 1),
        compiled_at: at(10_000),
    })
    .unwrap()
}

/// Body of a message that builds an artifact with no error findings
pub fn complete_artifact_body() -> String {
    let mut body = String::from("Kickoff for the drift investigation.\n\n");
    body += &add(
        "research_thread",
        serde_json::json!({"statement": "Why does the sensor drift after warm-up?"}),
    );
    body += &add("hypothesis_slate", hypothesis("Thermal"));
    body += &add("hypothesis_slate", hypothesis("Mechanical"));
    body += &add(
        "hypothesis_slate",
        serde_json::json!({
            "name": "Firmware",
            "claim": "A calibration table is reloaded late",
            "anchors": ["EV-001"],
            "third_alternative": true,
        }),
    );
    body += &add(
        "predictions_table",
        serde_json::json!({
            "condition": "Cold start",
            "predictions": {"H1": "drift", "H2": "no drift", "H3": "step"},
            "anchors": ["§20-24"],
        }),
    );
    for name in ["Chamber", "Shaker"] {
        body += &add(
            "discriminative_tests",
            serde_json::json!({
                "name": name,
                "procedure": "Run for an hour",
                "discriminates": ["H1", "H2", "H3"],
                "potency_check": "Known-good unit shows no drift",
                "anchors": ["§30"],
            }),
        );
    }
    body += &add(
        "assumption_ledger",
        serde_json::json!({
            "name": "Linear sensor",
            "statement": "Response is linear across range",
            "scale_check": true,
            "anchors": ["§40"],
        }),
    );
    body += &add(
        "anomaly_register",
        serde_json::json!({"name": "Spike", "observation": "Single spike at 14:02", "anchors": ["§50"]}),
    );
    body += &add(
        "adversarial_critique",
        serde_json::json!({"name": "Sampling", "attack": "Drift is a logging artifact", "anchors": ["§60"]}),
    );
    body
}
