use crate::apply::AppliedOp;
use crate::diff::model::{SectionDelta, SnapshotDelta};
use crate::ids::ItemId;
use crate::model::OpKind;

fn push_unique(list: &mut Vec<ItemId>, id: ItemId) {
    if !list.contains(&id) {
        list.push(id);
    }
}

/// Summarize applied operations with `from_cursor < sequence <= to_cursor`
///
/// `applied` is in merge order. An item added inside the segment is listed
/// as added only, even if later edits in the same segment touched it; a
/// kill is always listed.
pub fn compute_delta(
    applied: &[AppliedOp],
    from_cursor: u64,
    to_cursor: u64,
    previous_version: Option<u32>,
) -> SnapshotDelta {
    let mut delta = SnapshotDelta {
        previous_version,
        from_cursor,
        to_cursor,
        ..SnapshotDelta::default()
    };

    for op in applied
        .iter()
        .filter(|op| op.sequence > from_cursor && op.sequence <= to_cursor)
    {
        let section: &mut SectionDelta = delta.sections.entry(op.section).or_default();
        match op.kind {
            OpKind::Add => push_unique(&mut section.added, op.item_id),
            OpKind::Edit => {
                if !section.added.contains(&op.item_id) {
                    push_unique(&mut section.edited, op.item_id);
                }
            }
            OpKind::Kill => push_unique(&mut section.killed, op.item_id),
        }
    }

    delta
}
