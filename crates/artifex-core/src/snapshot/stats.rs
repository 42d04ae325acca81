use crate::model::{Artifact, Section};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionStats {
    pub total: usize,
    pub active: usize,
    pub killed: usize,
}

/// Per-section item counts of a compiled artifact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotStats {
    pub sections: BTreeMap<Section, SectionStats>,
    pub totals: SectionStats,
}

impl SnapshotStats {
    pub fn compute(artifact: &Artifact) -> Self {
        let mut stats = Self::default();
        for section in Section::ALL {
            let items = artifact.section(section);
            let active = items.iter().filter(|i| i.is_active()).count();
            let entry = SectionStats {
                total: items.len(),
                active,
                killed: items.len() - active,
            };
            stats.totals.total += entry.total;
            stats.totals.active += entry.active;
            stats.totals.killed += entry.killed;
            stats.sections.insert(section, entry);
        }
        stats
    }

    pub fn section(&self, section: Section) -> SectionStats {
        self.sections.get(&section).copied().unwrap_or_default()
    }
}
