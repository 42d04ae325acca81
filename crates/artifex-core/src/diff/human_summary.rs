use crate::diff::model::SnapshotDelta;
use crate::ids::ItemId;
use std::fmt::Write;

fn join(ids: &[ItemId]) -> String {
    ids.iter().map(ItemId::to_string).collect::<Vec<_>>().join(", ")
}

/// Plain-text summary, one line per non-empty change list
pub fn render_human_summary(delta: &SnapshotDelta) -> String {
    let mut out = String::new();
    let base = match delta.previous_version {
        Some(v) => format!("v{}", v),
        None => "empty artifact".to_string(),
    };
    let _ = writeln!(
        out,
        "Changes since {} (log {}..={})",
        base, delta.from_cursor, delta.to_cursor
    );
    if delta.is_empty() {
        out.push_str("  no changes\n");
        return out;
    }
    for (section, changes) in &delta.sections {
        for (label, ids) in [
            ("added", &changes.added),
            ("edited", &changes.edited),
            ("killed", &changes.killed),
        ] {
            if !ids.is_empty() {
                let _ = writeln!(out, "  {} {}: {}", section.title(), label, join(ids));
            }
        }
    }
    out
}
