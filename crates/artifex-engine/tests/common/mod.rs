#![allow(dead_code)]

use artifex_core::model::Message;
use artifex_core::ArtifexConfig;
use artifex_core_types::SessionId;
use artifex_engine::Engine;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};
use tempfile::TempDir;

pub fn setup_engine() -> (TempDir, Engine) {
    setup_engine_with(ArtifexConfig::default())
}

pub fn setup_engine_with(config: ArtifexConfig) -> (TempDir, Engine) {
    let temp_dir = TempDir::new().unwrap();
    let engine = Engine::open(
        temp_dir.path().join("store").join("artifex.db"),
        temp_dir.path().join("store").join("cas"),
        config,
    )
    .unwrap();
    (temp_dir, engine)
}

pub fn at(offset_secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap() + Duration::seconds(offset_secs)
}

pub fn block(delta: Value) -> String {
    format!("```delta\n{}\n```\n", delta)
}

pub fn add(section: &str, payload: Value) -> String {
    block(json!({
        "operation": "ADD",
        "section": section,
        "target_id": null,
        "payload": payload,
    }))
}

pub fn kill(section: &str, target: &str, reason: &str) -> String {
    block(json!({
        "operation": "KILL",
        "section": section,
        "target_id": target,
        "payload": {"reason": reason},
    }))
}

pub fn hypothesis(name: &str) -> Value {
    json!({"name": name, "claim": format!("{} explains the drift", name), "anchors": ["§12"]})
}

pub fn message(session: &str, id: &str, offset_secs: i64, body: &str) -> Message {
    Message {
        id: id.to_string(),
        sender: "alice".to_string(),
        timestamp: at(offset_secs),
        session_id: SessionId::new(session),
        subject: "delta".to_string(),
        body: body.to_string(),
    }
}

/// Body of a message that builds an artifact with no error findings
pub fn complete_artifact_body() -> String {
    let mut body = String::from("Kickoff.\n\n");
    body += &add(
        "research_thread",
        json!({"statement": "Why does the sensor drift after warm-up?"}),
    );
    body += &add("hypothesis_slate", hypothesis("Thermal"));
    body += &add("hypothesis_slate", hypothesis("Mechanical"));
    body += &add(
        "hypothesis_slate",
        json!({
            "name": "Firmware",
            "claim": "A calibration table is reloaded late",
            "anchors": ["EV-001"],
            "third_alternative": true,
        }),
    );
    body += &add(
        "predictions_table",
        json!({
            "condition": "Cold start",
            "predictions": {"H1": "drift", "H2": "no drift", "H3": "step"},
            "anchors": ["§20-24"],
        }),
    );
    for name in ["Chamber", "Shaker"] {
        body += &add(
            "discriminative_tests",
            json!({
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
        json!({
            "name": "Linear sensor",
            "statement": "Response is linear across range",
            "scale_check": true,
            "anchors": ["§40"],
        }),
    );
    body += &add(
        "anomaly_register",
        json!({"name": "Spike", "observation": "Single spike at 14:02", "anchors": ["§50"]}),
    );
    body += &add(
        "adversarial_critique",
        json!({"name": "Sampling", "attack": "Drift is a logging artifact", "anchors": ["§60"]}),
    );
    body
}
