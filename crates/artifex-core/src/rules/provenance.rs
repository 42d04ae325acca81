//! Citation provenance rules

use crate::model::{Anchor, Item, Location, Section};
use crate::rules::catalog::Finding;
use crate::rules::context::LintContext;
use serde_json::Value;

const INFERENCE_LABEL: &str = "[inference]";

fn anchors_location(item: &Item) -> Location {
    Location::item(item.section(), item.id.to_string()).with_field("anchors")
}

/// Citations of an item: its anchors plus any `evidence_refs` entries
fn citations(item: &Item) -> Vec<Anchor> {
    let mut all = item.anchors();
    if let Some(Value::Array(refs)) = item.field("evidence_refs") {
        all.extend(refs.iter().filter_map(Value::as_str).map(Anchor::classify));
    }
    all
}

pub fn check_anchor_range(ctx: &LintContext<'_>, item: &Item) -> Vec<Finding> {
    let max = ctx.config.corpus_max_anchor;
    item.anchors()
        .into_iter()
        .filter_map(|anchor| match anchor {
            Anchor::Quote { start, end } if start < 1 || end > max => Some(Finding::new(
                format!(
                    "{} cites §{}{} outside the corpus range §1-§{}",
                    item.id,
                    start,
                    if start == end { String::new() } else { format!("-{}", end) },
                    max
                ),
                anchors_location(item),
            )),
            _ => None,
        })
        .collect()
}

pub fn check_citation_present(_ctx: &LintContext<'_>, item: &Item) -> Vec<Finding> {
    if item.section() == Section::ResearchThread {
        return Vec::new();
    }
    // `axiomatic` is itself a recognized form, which covers the exemption
    if citations(item).iter().any(Anchor::is_recognized) {
        return Vec::new();
    }
    vec![Finding::new(
        format!("{} makes a claim without a recognized citation", item.id),
        anchors_location(item),
    )]
}

pub fn check_citation_forms(_ctx: &LintContext<'_>, item: &Item) -> Vec<Finding> {
    item.anchors()
        .into_iter()
        .filter_map(|anchor| match anchor {
            Anchor::Unrecognized(raw) => Some(Finding::new(
                format!("{} has unrecognized citation '{}'", item.id, raw),
                anchors_location(item),
            )),
            _ => None,
        })
        .collect()
}

/// Inference-only: every recognized citation is `inference`
pub fn check_inference_label(_ctx: &LintContext<'_>, item: &Item) -> Vec<Finding> {
    if item.section() == Section::ResearchThread {
        return Vec::new();
    }
    let recognized: Vec<Anchor> = citations(item)
        .into_iter()
        .filter(Anchor::is_recognized)
        .collect();
    let inference_only =
        !recognized.is_empty() && recognized.iter().all(|a| matches!(a, Anchor::Inference));
    if !inference_only || item.text().to_lowercase().contains(INFERENCE_LABEL) {
        return Vec::new();
    }
    vec![Finding::new(
        format!("{} rests on inference only but its text lacks an {} label", item.id, INFERENCE_LABEL),
        anchors_location(item),
    )]
}
