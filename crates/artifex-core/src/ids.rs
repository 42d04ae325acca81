//! Section-scoped item identifiers and their allocator

use crate::model::{Artifact, Item, Section};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// A section-scoped item id such as `H3` or `RT1`
///
/// Ordered by section, then number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId {
    section: Section,
    number: u32,
}

impl ItemId {
    pub fn new(section: Section, number: u32) -> Self {
        Self { section, number }
    }

    /// Parse `<prefix><digits>`.
    ///
    /// Digits must be canonical (no sign, no leading zero), so every parsed
    /// id displays back to the same string. `H0` parses; rejecting it is a
    /// linter concern.
    pub fn parse(raw: &str) -> Option<Self> {
        // RT must be tried before the single-letter prefixes
        let (section, digits) = if let Some(rest) = raw.strip_prefix("RT") {
            (Section::ResearchThread, rest)
        } else {
            let mut chars = raw.chars();
            let first = chars.next()?;
            let section = Section::from_prefix(&first.to_string())?;
            (section, chars.as_str())
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return None;
        }
        let number = digits.parse().ok()?;
        Some(Self { section, number })
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn number(&self) -> u32 {
        self.number
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.section.prefix(), self.number)
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ItemId::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid item id '{}'", raw)))
    }
}

/// Per-section monotonic id counters plus an id → position index
///
/// Owned by one merge; sessions never share an allocator. Counters start at
/// 1 and only move forward, so a killed item's id is never handed out again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    next: BTreeMap<Section, u32>,
    index: BTreeMap<ItemId, usize>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next ADD to `section` would receive
    pub fn peek(&self, section: Section) -> ItemId {
        ItemId::new(section, self.next.get(&section).copied().unwrap_or(1))
    }

    /// Hand out the next id for `section`. `position` is the index the new
    /// item will occupy in its section's list.
    pub fn allocate(&mut self, section: Section, position: usize) -> ItemId {
        let id = self.peek(section);
        self.next.insert(section, id.number + 1);
        self.index.insert(id, position);
        id
    }

    /// Number of ids issued so far in `section`
    pub fn issued(&self, section: Section) -> u32 {
        self.peek(section).number - 1
    }

    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Resolve an id to its item, killed items included
    pub fn lookup<'a>(&self, artifact: &'a Artifact, id: &ItemId) -> Option<&'a Item> {
        let position = self.position(id)?;
        artifact.section(id.section).get(position)
    }
}
