//! Local cross-reference and cross-session reference rules

use crate::ids::ItemId;
use crate::model::item::KNOWN_RELATIONS;
use crate::model::{Item, Location, Section};
use crate::rules::catalog::Finding;
use crate::rules::context::{LintContext, RemoteStatus};

fn field_location(item: &Item, field: &str) -> Location {
    Location::item(item.section(), item.id.to_string()).with_field(field)
}

/// `discriminates` and `predictions` must point at hypotheses
fn expected_section(field: &str) -> Option<Section> {
    match field {
        "discriminates" | "predictions" => Some(Section::HypothesisSlate),
        _ => None,
    }
}

pub fn check_unknown_targets(ctx: &LintContext<'_>, item: &Item) -> Vec<Finding> {
    item.local_references()
        .into_iter()
        .filter_map(|(field, raw)| {
            let target = ctx.resolve_local(&raw);
            let wrong_section = match (target, expected_section(field)) {
                (Some(t), Some(expected)) => t.section() != expected,
                _ => false,
            };
            if target.is_some() && !wrong_section {
                return None;
            }
            let message = if wrong_section {
                format!("{} {} references {}, which is not a hypothesis", item.id, field, raw)
            } else {
                format!("{} {} references unknown item '{}'", item.id, field, raw)
            };
            Some(Finding::new(message, field_location(item, field)))
        })
        .collect()
}

pub fn check_killed_targets(ctx: &LintContext<'_>, item: &Item) -> Vec<Finding> {
    item.local_references()
        .into_iter()
        .filter_map(|(field, raw)| {
            let target = ctx.resolve_local(&raw)?;
            (!target.is_active()).then(|| {
                Finding::new(
                    format!("{} {} references killed item {}", item.id, field, raw),
                    field_location(item, field),
                )
            })
        })
        .collect()
}

pub fn check_cross_session_form(_ctx: &LintContext<'_>, item: &Item) -> Vec<Finding> {
    item.references
        .iter()
        .filter_map(|r| {
            let problem = if r.session.trim().is_empty() {
                "has an empty session".to_string()
            } else if ItemId::parse(&r.item).is_none() {
                format!("names '{}', which is not an item id", r.item)
            } else if !KNOWN_RELATIONS.contains(&r.relation.as_str()) {
                format!("uses unknown relation '{}'", r.relation)
            } else {
                return None;
            };
            Some(Finding::new(
                format!("{} cross-session reference {}", item.id, problem),
                field_location(item, "references"),
            ))
        })
        .collect()
}

pub fn check_cross_session_targets(ctx: &LintContext<'_>, item: &Item) -> Vec<Finding> {
    item.references
        .iter()
        .filter(|r| !r.session.trim().is_empty() && ItemId::parse(&r.item).is_some())
        .filter_map(|r| {
            let state = match ctx.resolver.resolve(&r.session, &r.item) {
                RemoteStatus::Missing => "does not exist",
                RemoteStatus::Killed => "is killed",
                RemoteStatus::Active | RemoteStatus::Unknown => return None,
            };
            Some(Finding::new(
                format!("{} references {}/{}, which {}", item.id, r.session, r.item, state),
                field_location(item, "references"),
            ))
        })
        .collect()
}

pub fn check_cross_session_present(_ctx: &LintContext<'_>, item: &Item) -> Vec<Finding> {
    if item.references.is_empty() {
        return Vec::new();
    }
    vec![Finding::new(
        format!(
            "{} carries {} cross-session reference(s), not checked by the merge",
            item.id,
            item.references.len()
        ),
        field_location(item, "references"),
    )]
}
