//! Cross-section id invariants
//!
//! The merge cannot produce these violations; they guard artifacts read back
//! from storage or assembled by hand.

use crate::ids::ItemId;
use crate::model::{Artifact, Location, Section};
use crate::rules::catalog::Finding;
use crate::rules::context::LintContext;
use std::collections::{BTreeMap, BTreeSet};

/// Items whose id belongs to another section or has number 0
pub fn find_malformed_ids(artifact: &Artifact) -> Vec<(Section, ItemId)> {
    let mut found = Vec::new();
    for section in Section::ALL {
        for item in artifact.section(section) {
            if item.id.section() != section || item.id.number() == 0 {
                found.push((section, item.id));
            }
        }
    }
    found
}

/// Ids that occur more than once in their section, with their count
pub fn find_duplicate_ids(artifact: &Artifact) -> Vec<(Section, ItemId, usize)> {
    let mut found = Vec::new();
    for section in Section::ALL {
        let mut counts: BTreeMap<ItemId, usize> = BTreeMap::new();
        for item in artifact.section(section) {
            *counts.entry(item.id).or_insert(0) += 1;
        }
        found.extend(
            counts
                .into_iter()
                .filter(|(_, n)| *n > 1)
                .map(|(id, n)| (section, id, n)),
        );
    }
    found
}

/// First missing number in each section whose ids are not exactly 1..=n
pub fn find_id_gaps(artifact: &Artifact) -> Vec<(Section, u32)> {
    let mut found = Vec::new();
    for section in Section::ALL {
        let numbers: BTreeSet<u32> = artifact
            .section(section)
            .iter()
            .filter(|item| item.id.section() == section && item.id.number() > 0)
            .map(|item| item.id.number())
            .collect();
        let missing = (1..).zip(numbers.iter()).find(|(expected, n)| *expected != **n);
        if let Some((expected, _)) = missing {
            found.push((section, expected));
        }
    }
    found
}

pub fn check_id_format(ctx: &LintContext<'_>) -> Vec<Finding> {
    find_malformed_ids(ctx.artifact)
        .into_iter()
        .map(|(section, id)| {
            Finding::new(
                format!("id {} is not of the form {}<n> with n >= 1", id, section.prefix()),
                Location::item(section, id.to_string()),
            )
        })
        .collect()
}

pub fn check_duplicate_ids(ctx: &LintContext<'_>) -> Vec<Finding> {
    find_duplicate_ids(ctx.artifact)
        .into_iter()
        .map(|(section, id, n)| {
            Finding::new(
                format!("id {} appears {} times", id, n),
                Location::item(section, id.to_string()),
            )
        })
        .collect()
}

pub fn check_id_gaps(ctx: &LintContext<'_>) -> Vec<Finding> {
    find_id_gaps(ctx.artifact)
        .into_iter()
        .map(|(section, missing)| {
            Finding::new(
                format!("id {}{} is missing from the sequence", section.prefix(), missing),
                Location::section(section),
            )
        })
        .collect()
}
