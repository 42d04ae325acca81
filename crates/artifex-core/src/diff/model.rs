use crate::ids::ItemId;
use crate::model::Section;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Changes to one section, ids in first-seen order without repeats
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDelta {
    pub added: Vec<ItemId>,
    pub edited: Vec<ItemId>,
    pub killed: Vec<ItemId>,
}

impl SectionDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.edited.is_empty() && self.killed.is_empty()
    }
}

/// Changes between two snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDelta {
    /// `None` for the first snapshot of a session
    pub previous_version: Option<u32>,
    /// Exclusive lower log bound
    pub from_cursor: u64,
    /// Inclusive upper log bound
    pub to_cursor: u64,
    /// Only sections with changes appear
    pub sections: BTreeMap<Section, SectionDelta>,
}

impl SnapshotDelta {
    pub fn is_empty(&self) -> bool {
        self.sections.values().all(SectionDelta::is_empty)
    }

    pub fn section(&self, section: Section) -> Option<&SectionDelta> {
        self.sections.get(&section)
    }

    pub fn total_changes(&self) -> usize {
        self.sections
            .values()
            .map(|d| d.added.len() + d.edited.len() + d.killed.len())
            .sum()
    }
}
