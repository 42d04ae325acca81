use crate::ids::ItemId;
use crate::model::{Item, Section};
use artifex_core_types::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStatus {
    Draft,
    Active,
    Closed,
}

impl std::fmt::Display for ArtifactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactStatus::Draft => f.write_str("draft"),
            ArtifactStatus::Active => f.write_str("active"),
            ArtifactStatus::Closed => f.write_str("closed"),
        }
    }
}

/// The merged working document of one session
///
/// All seven sections are always present, possibly empty. Timestamps come
/// from the folded messages, never from the wall clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub session_id: SessionId,
    pub status: ArtifactStatus,
    /// Snapshot version this state was compiled as; 0 while uncompiled
    pub version: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub contributors: BTreeSet<String>,
    pub sections: BTreeMap<Section, Vec<Item>>,
}

impl Artifact {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            status: ArtifactStatus::Draft,
            version: 0,
            created_at: None,
            updated_at: None,
            contributors: BTreeSet::new(),
            sections: Section::ALL.into_iter().map(|s| (s, Vec::new())).collect(),
        }
    }

    pub fn section(&self, section: Section) -> &[Item] {
        self.sections.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn section_mut(&mut self, section: Section) -> &mut Vec<Item> {
        self.sections.entry(section).or_default()
    }

    /// Linear lookup by id. The merge uses the allocator's index instead;
    /// this is for artifacts read back from snapshots.
    pub fn find(&self, id: &ItemId) -> Option<&Item> {
        self.section(id.section()).iter().find(|item| item.id == *id)
    }

    /// Items across all sections in render order
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        Section::ALL
            .into_iter()
            .flat_map(move |section| self.section(section).iter())
    }

    pub fn count(&self, section: Section, include_killed: bool) -> usize {
        self.section(section)
            .iter()
            .filter(|item| include_killed || item.is_active())
            .count()
    }

    pub fn killed_count(&self) -> usize {
        self.items().filter(|item| !item.is_active()).count()
    }
}
