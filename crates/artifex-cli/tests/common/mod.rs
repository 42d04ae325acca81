#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_artifex"))
        .current_dir(dir.path())
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn block(delta: Value) -> String {
    format!("```delta\n{}\n```\n", delta)
}

fn add(section: &str, payload: Value) -> String {
    block(json!({
        "operation": "ADD",
        "section": section,
        "target_id": null,
        "payload": payload,
    }))
}

fn hypothesis(name: &str, third: bool) -> Value {
    json!({
        "name": name,
        "claim": format!("{} explains the drift", name),
        "anchors": ["§12"],
        "third_alternative": third,
    })
}

/// Delta body with no error findings
pub fn complete_body() -> String {
    let mut body = add(
        "research_thread",
        json!({"statement": "Why does the sensor drift after warm-up?"}),
    );
    body += &add("hypothesis_slate", hypothesis("Thermal", false));
    body += &add("hypothesis_slate", hypothesis("Mechanical", false));
    body += &add("hypothesis_slate", hypothesis("Firmware", true));
    body += &add(
        "predictions_table",
        json!({
            "condition": "Cold start",
            "predictions": {"H1": "drift", "H2": "no drift", "H3": "step"},
            "anchors": ["§20"],
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
        json!({"name": "Linear", "statement": "Linear response", "scale_check": true, "anchors": ["§40"]}),
    );
    body += &add(
        "anomaly_register",
        json!({"name": "Spike", "observation": "Spike at 14:02", "anchors": ["§50"]}),
    );
    body += &add(
        "adversarial_critique",
        json!({"name": "Sampling", "attack": "Logging artifact", "anchors": ["§60"]}),
    );
    body
}

pub fn single_hypothesis_body() -> String {
    add("hypothesis_slate", hypothesis("Lonely", false))
}

/// Write a JSON transcript with one message per body
pub fn write_transcript(dir: &Path, name: &str, session: &str, bodies: &[String]) -> PathBuf {
    let messages: Vec<Value> = bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            json!({
                "id": format!("{}-m{}", session, i + 1),
                "sender": "alice",
                "timestamp": format!("2026-03-01T09:{:02}:00Z", i),
                "subject": "delta",
                "body": body,
            })
        })
        .collect();
    let path = dir.join(name);
    let transcript = json!({"schema_version": 0, "session_id": session, "messages": messages});
    std::fs::write(&path, serde_json::to_string_pretty(&transcript).unwrap()).unwrap();
    path
}
