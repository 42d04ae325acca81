#![allow(dead_code)]

use artifex_core::model::Message;
use artifex_core::rules::NoopResolver;
use artifex_core::snapshot::{compile_snapshot, CompileRequest, CompiledSnapshot, SnapshotLineage};
use artifex_core::{ArtifexConfig, Linter, LogEntry, RuleCatalog};
use artifex_core_types::SessionId;
use artifex_store::cas::FsStore;
use chrono::{Duration, TimeZone, Utc};
use rusqlite::Connection;
use tempfile::TempDir;

pub fn setup_test_env() -> (TempDir, Connection, FsStore) {
    let temp_dir = TempDir::new().unwrap();
    let conn = artifex_store::db::open_migrated(temp_dir.path().join("artifex.db")).unwrap();
    let cas = FsStore::new(temp_dir.path().join("cas"));
    (temp_dir, conn, cas)
}

pub fn hypothesis_add(name: &str) -> String {
    format!(
        "```delta\n{}\n```\n",
        serde_json::json!({
            "operation": "ADD",
            "section": "hypothesis_slate",
            "target_id": null,
            "payload": {"name": name, "claim": "explains it", "anchors": ["§3"]},
        })
    )
}

pub fn message(session: &str, id: &str, offset_secs: i64, body: &str) -> Message {
    Message {
        id: id.to_string(),
        sender: "alice".to_string(),
        timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
            + Duration::seconds(offset_secs),
        session_id: SessionId::new(session),
        subject: "delta".to_string(),
        body: body.to_string(),
    }
}

pub fn compile(
    session: &str,
    entries: &[LogEntry],
    history: &[SnapshotLineage],
) -> CompiledSnapshot {
    let config = ArtifexConfig::default();
    let catalog = RuleCatalog::standard();
    let linter = Linter::new(&catalog, &config.lint, &NoopResolver);
    compile_snapshot(CompileRequest {
        session_id: &SessionId::new(session),
        entries,
        history,
        config: &config,
        linter: &linter,
        snapshot_id: uuid::Uuid::now_v7().to_string(),
        compiled_at: Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap(),
    })
    .unwrap()
}
