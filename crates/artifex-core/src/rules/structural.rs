//! Per-section structure: required fields, counts, section-specific flags

use crate::model::section::field_is_present;
use crate::model::{Item, Location, Section};
use crate::rules::catalog::Finding;
use crate::rules::context::LintContext;
use serde_json::Value;
use std::collections::BTreeSet;

fn count_finding(section: Section, found: usize, bound: usize, relation: &str, noun: &str) -> Finding {
    Finding::new(
        format!("{} {} {} {} (found {})", section.title(), relation, bound, noun, found),
        Location::section(section),
    )
}

fn active_count(ctx: &LintContext<'_>, section: Section) -> usize {
    ctx.artifact.count(section, false)
}

pub fn check_single_thread(ctx: &LintContext<'_>) -> Vec<Finding> {
    let found = active_count(ctx, Section::ResearchThread);
    if found == 1 {
        return Vec::new();
    }
    vec![Finding::new(
        format!("exactly one active research thread item required (found {})", found),
        Location::section(Section::ResearchThread),
    )]
}

pub fn check_min_hypotheses(ctx: &LintContext<'_>) -> Vec<Finding> {
    let found = ctx.counted(Section::HypothesisSlate);
    let min = ctx.config.min_hypotheses;
    if found >= min {
        return Vec::new();
    }
    vec![count_finding(Section::HypothesisSlate, found, min, "needs at least", "hypotheses")]
}

pub fn check_max_hypotheses(ctx: &LintContext<'_>) -> Vec<Finding> {
    let found = ctx.counted(Section::HypothesisSlate);
    let max = ctx.config.max_hypotheses;
    if found <= max {
        return Vec::new();
    }
    vec![count_finding(Section::HypothesisSlate, found, max, "should hold at most", "hypotheses")]
}

pub fn check_third_alternative(ctx: &LintContext<'_>) -> Vec<Finding> {
    let present = ctx
        .artifact
        .section(Section::HypothesisSlate)
        .iter()
        .any(|h| h.is_active() && h.flag("third_alternative"));
    if present {
        return Vec::new();
    }
    vec![Finding::new(
        "no active hypothesis is flagged third_alternative: true",
        Location::section(Section::HypothesisSlate),
    )]
}

pub fn check_min_tests(ctx: &LintContext<'_>) -> Vec<Finding> {
    let found = ctx.counted(Section::DiscriminativeTests);
    let min = ctx.config.min_tests;
    if found >= min {
        return Vec::new();
    }
    vec![count_finding(Section::DiscriminativeTests, found, min, "needs at least", "tests")]
}

pub fn check_min_critiques(ctx: &LintContext<'_>) -> Vec<Finding> {
    let found = ctx.counted(Section::AdversarialCritique);
    let min = ctx.config.min_critiques;
    if found >= min {
        return Vec::new();
    }
    vec![count_finding(Section::AdversarialCritique, found, min, "needs at least", "critiques")]
}

pub fn check_scale_assumption(ctx: &LintContext<'_>) -> Vec<Finding> {
    let present = ctx
        .artifact
        .section(Section::AssumptionLedger)
        .iter()
        .any(|a| a.is_active() && a.flag("scale_check"));
    if present {
        return Vec::new();
    }
    vec![Finding::new(
        "no active assumption carries scale_check: true",
        Location::section(Section::AssumptionLedger),
    )]
}

pub fn check_anomalies_present(ctx: &LintContext<'_>) -> Vec<Finding> {
    if !ctx.artifact.section(Section::AnomalyRegister).is_empty() {
        return Vec::new();
    }
    vec![Finding::new(
        "anomaly register is empty",
        Location::section(Section::AnomalyRegister),
    )]
}

pub fn check_required_fields(_ctx: &LintContext<'_>, item: &Item) -> Vec<Finding> {
    let section = item.section();
    section
        .required_fields()
        .iter()
        .filter(|field| !field_is_present(item.field(field)))
        .map(|field| {
            Finding::new(
                format!("{} is missing required field '{}'", item.id, field),
                Location::item(section, item.id.to_string()).with_field(*field),
            )
        })
        .collect()
}

pub fn check_potency(_ctx: &LintContext<'_>, item: &Item) -> Vec<Finding> {
    if item.section() != Section::DiscriminativeTests || field_is_present(item.field("potency_check")) {
        return Vec::new();
    }
    vec![Finding::new(
        format!("test {} has no potency_check", item.id),
        Location::item(item.section(), item.id.to_string()).with_field("potency_check"),
    )]
}

pub fn check_discrimination_width(_ctx: &LintContext<'_>, item: &Item) -> Vec<Finding> {
    if item.section() != Section::DiscriminativeTests {
        return Vec::new();
    }
    let Some(Value::Array(targets)) = item.field("discriminates") else {
        return Vec::new();
    };
    let distinct: BTreeSet<String> = targets.iter().map(Value::to_string).collect();
    if distinct.len() >= 2 {
        return Vec::new();
    }
    vec![Finding::new(
        format!("test {} discriminates {} hypothesis(es); at least 2 needed", item.id, distinct.len()),
        Location::item(item.section(), item.id.to_string()).with_field("discriminates"),
    )]
}
