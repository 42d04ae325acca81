//! Whole-document rules over the metadata header and lifecycle

use crate::model::{Location, Section};
use crate::rules::catalog::Finding;
use crate::rules::context::LintContext;

pub fn check_metadata(ctx: &LintContext<'_>) -> Vec<Finding> {
    if ctx.artifact.session_id.is_empty() {
        return vec![Finding::new("artifact has no session id", Location::document())];
    }
    Vec::new()
}

pub fn check_thread_edited(ctx: &LintContext<'_>) -> Vec<Finding> {
    ctx.artifact
        .section(Section::ResearchThread)
        .iter()
        .filter(|item| item.revision > 0)
        .map(|item| {
            Finding::new(
                format!("research thread {} was edited {} time(s) after creation", item.id, item.revision),
                Location::item(Section::ResearchThread, item.id.to_string()),
            )
        })
        .collect()
}

pub fn check_killed_present(ctx: &LintContext<'_>) -> Vec<Finding> {
    match ctx.artifact.killed_count() {
        0 => Vec::new(),
        n => vec![Finding::new(format!("{} killed item(s) present", n), Location::document())],
    }
}
