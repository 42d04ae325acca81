//! Single-operation apply
//!
//! `apply` validates an operation against the current merge state before
//! touching it: on `Err` the state is exactly as it was. Rejections are
//! values, not failures; the caller records the violation and moves on.

use crate::config::MergeConfig;
use crate::ids::ItemId;
use crate::merge::fields::{apply_payload, merge_array};
use crate::merge::MergeState;
use crate::model::{Item, ItemState, Location, OpKind, OpSource, Operation, Section, Violation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Record of an operation that changed the artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedOp {
    pub sequence: u64,
    pub index: usize,
    pub message_id: String,
    pub kind: OpKind,
    pub section: Section,
    pub item_id: ItemId,
    pub timestamp: DateTime<Utc>,
}

/// Apply one operation to the merge state
///
/// # Errors
///
/// Returns the `W2xx` violation when the operation is rejected:
/// `W201` missing target, `W202` section full, `W203` target already killed.
pub fn apply(
    state: &mut MergeState,
    op: &Operation,
    source: &OpSource,
    config: &MergeConfig,
) -> Result<AppliedOp, Violation> {
    let item_id = match op.kind {
        OpKind::Add => add(state, op, source, config)?,
        OpKind::Edit => {
            let (id, position) = resolve_target(state, op, source)?;
            let item = &mut state.artifact.section_mut(op.section)[position];
            apply_payload(&mut item.fields, &op.payload);
            attach_provenance(item, op);
            item.revision += 1;
            id
        }
        OpKind::Kill => {
            let (id, position) = resolve_target(state, op, source)?;
            let item = &mut state.artifact.section_mut(op.section)[position];
            if item.state == ItemState::Killed {
                return Err(Violation::rejection(
                    "W203",
                    format!("{} is already killed", id),
                    Location::item(op.section, id.to_string()).with_message(&source.message_id),
                ));
            }
            item.state = ItemState::Killed;
            item.kill_reason = op.reason().map(str::to_string);
            id
        }
    };

    state.artifact.contributors.insert(source.sender.clone());
    state.artifact.updated_at = Some(source.timestamp);

    Ok(AppliedOp {
        sequence: source.sequence,
        index: source.index,
        message_id: source.message_id.clone(),
        kind: op.kind,
        section: op.section,
        item_id,
        timestamp: source.timestamp,
    })
}

fn add(
    state: &mut MergeState,
    op: &Operation,
    source: &OpSource,
    config: &MergeConfig,
) -> Result<ItemId, Violation> {
    let limit = config.max_items(op.section);
    if state.artifact.count(op.section, false) >= limit {
        return Err(Violation::rejection(
            "W202",
            format!("{} is at its maximum of {} item(s)", op.section, limit),
            Location::section(op.section).with_message(&source.message_id),
        ));
    }

    let position = state.artifact.section(op.section).len();
    let id = state.ids.allocate(op.section, position);
    let mut item = Item::new(id, source.message_id.clone());
    apply_payload(&mut item.fields, &op.payload);
    attach_provenance(&mut item, op);
    state.artifact.section_mut(op.section).push(item);
    Ok(id)
}

/// Target must parse, belong to the operation's section, and have been
/// allocated in this session.
fn resolve_target(
    state: &MergeState,
    op: &Operation,
    source: &OpSource,
) -> Result<(ItemId, usize), Violation> {
    let raw = op.target_id.as_deref().unwrap_or_default();
    let resolved = ItemId::parse(raw)
        .filter(|id| id.section() == op.section)
        .and_then(|id| state.ids.position(&id).map(|position| (id, position)));
    resolved.ok_or_else(|| {
        Violation::rejection(
            "W201",
            format!("{} target '{}' does not exist in {}", op.kind, raw, op.section),
            Location::item(op.section, raw).with_message(&source.message_id),
        )
    })
}

fn attach_provenance(item: &mut Item, op: &Operation) {
    if !op.evidence_refs.is_empty() {
        let incoming: Vec<Value> = op
            .evidence_refs
            .iter()
            .map(|r| Value::String(r.clone()))
            .collect();
        match item.fields.get_mut("evidence_refs") {
            Some(Value::Array(existing)) => merge_array(existing, &incoming),
            _ => {
                let mut fresh = Vec::new();
                merge_array(&mut fresh, &incoming);
                item.fields
                    .insert("evidence_refs".to_string(), Value::Array(fresh));
            }
        }
    }
    for reference in &op.references {
        if !item.references.contains(reference) {
            item.references.push(reference.clone());
        }
    }
}
