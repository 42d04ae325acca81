use crate::model::{Artifact, Item, Section};
use crate::snapshot::CompiledSnapshot;
use serde_json::Value;

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(values) => values
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", k, format_value(v)))
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

fn render_item(output: &mut String, item: &Item) {
    output.push_str(&format!("### {} [{}]\n\n", item.id, item.state));

    if let Some(reason) = &item.kill_reason {
        output.push_str(&format!("**Killed**: {}\n\n", reason));
    }

    // BTreeMap iteration gives fields sorted by name
    for (name, value) in &item.fields {
        output.push_str(&format!("- **{}**: {}\n", name, format_value(value)));
    }
    for reference in &item.references {
        output.push_str(&format!(
            "- **{}**: {}/{}\n",
            reference.relation, reference.session, reference.item
        ));
    }
    output.push('\n');
}

/// Render an artifact to Markdown
///
/// Metadata header table, then all seven sections in fixed order. Empty
/// sections are rendered with a placeholder so the layout never shifts.
pub fn render_artifact(artifact: &Artifact) -> String {
    let mut output = String::new();

    output.push_str(&format!("# Artifact {}\n\n", artifact.session_id));
    output.push_str("| field | value |\n|---|---|\n");
    output.push_str(&format!("| session | {} |\n", artifact.session_id));
    output.push_str(&format!("| version | {} |\n", artifact.version));
    output.push_str(&format!("| status | {} |\n", artifact.status));
    let stamp = |ts: Option<chrono::DateTime<chrono::Utc>>| {
        ts.map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".to_string())
    };
    output.push_str(&format!("| created | {} |\n", stamp(artifact.created_at)));
    output.push_str(&format!("| updated | {} |\n", stamp(artifact.updated_at)));
    let contributors: Vec<&str> = artifact.contributors.iter().map(String::as_str).collect();
    output.push_str(&format!("| contributors | {} |\n\n", contributors.join(", ")));

    for section in Section::ALL {
        output.push_str(&format!("## {}\n\n", section.title()));
        let items = artifact.section(section);
        if items.is_empty() {
            output.push_str("_No items._\n\n");
            continue;
        }
        for item in items {
            render_item(&mut output, item);
        }
    }

    output
}

/// Render a compiled snapshot: the artifact plus a compile summary
pub fn render_snapshot(snapshot: &CompiledSnapshot) -> String {
    let mut output = render_artifact(&snapshot.artifact);
    output.push_str("## Compilation\n\n");
    output.push_str(&format!(
        "- **result**: {}\n- **errors**: {}\n- **warnings**: {}\n- **info**: {}\n- **digest**: {}\n",
        if snapshot.publishable { "publishable" } else { "not publishable" },
        snapshot.report.error_count,
        snapshot.report.warning_count,
        snapshot.report.info_count,
        snapshot.artifact_digest,
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ItemId;
    use crate::model::ItemState;
    use artifex_core_types::SessionId;
    use serde_json::json;

    #[test]
    fn renders_sections_in_order_with_killed_reason() {
        let mut artifact = Artifact::new(SessionId::new("s-1"));
        let mut item = Item::new(ItemId::new(Section::HypothesisSlate, 2), "m-1");
        item.state = ItemState::Killed;
        item.kill_reason = Some("superseded by H4".to_string());
        item.fields.insert("name".to_string(), json!("Drift"));
        item.fields.insert("claim".to_string(), json!("c"));
        artifact.section_mut(Section::HypothesisSlate).push(item);

        let md = render_artifact(&artifact);
        let rt = md.find("## Research Thread").unwrap();
        let hs = md.find("## Hypothesis Slate").unwrap();
        let ac = md.find("## Adversarial Critique").unwrap();
        assert!(rt < hs && hs < ac);
        assert!(md.contains("### H2 [killed]"));
        assert!(md.contains("**Killed**: superseded by H4"));
        assert!(md.find("**claim**").unwrap() < md.find("**name**").unwrap());
    }
}
