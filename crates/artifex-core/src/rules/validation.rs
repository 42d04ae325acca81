//! Rule runner: full-document and incremental modes

use crate::apply::apply;
use crate::config::{LintConfig, MergeConfig};
use crate::merge::MergeState;
use crate::model::{Artifact, Item, OpSource, Operation, Violation};
use crate::rules::catalog::{Check, Finding, RuleCatalog, RuleSpec};
use crate::rules::context::{LintContext, RemoteResolver};

/// Evaluates a rule catalog with one configuration and resolver
pub struct Linter<'a> {
    catalog: &'a RuleCatalog,
    config: &'a LintConfig,
    resolver: &'a dyn RemoteResolver,
}

impl<'a> Linter<'a> {
    pub fn new(
        catalog: &'a RuleCatalog,
        config: &'a LintConfig,
        resolver: &'a dyn RemoteResolver,
    ) -> Self {
        Self {
            catalog,
            config,
            resolver,
        }
    }

    fn enabled(&self) -> impl Iterator<Item = &'a RuleSpec> + '_ {
        self.catalog
            .rules()
            .iter()
            .filter(|rule| !self.config.disabled.contains(rule.id))
    }

    fn context<'b>(&self, artifact: &'b Artifact) -> LintContext<'b>
    where
        'a: 'b,
    {
        LintContext {
            artifact,
            config: self.config,
            resolver: self.resolver,
        }
    }

    /// Full validation. Results follow registration order; within a rule,
    /// artifact order (section, then position).
    pub fn lint(&self, artifact: &Artifact) -> Vec<Violation> {
        let ctx = self.context(artifact);
        let mut violations = Vec::new();
        for rule in self.enabled() {
            let findings = match rule.check {
                Check::Item(check) => artifact
                    .items()
                    .filter(|item| item.is_active())
                    .flat_map(|item| check(&ctx, item))
                    .collect(),
                Check::Section(_, check) | Check::Document(check) => check(&ctx),
            };
            violations.extend(stamp(rule, findings));
        }
        violations
    }

    /// Incremental validation of one candidate operation
    ///
    /// The operation is applied to a copy of `state`. A rejection is returned
    /// on its own. Otherwise only item rules for the affected item and the
    /// section rules of its section run; document rules wait for the next
    /// full compile.
    pub fn lint_delta(
        &self,
        state: &MergeState,
        op: &Operation,
        source: &OpSource,
        merge: &MergeConfig,
    ) -> Vec<Violation> {
        let mut speculative = state.clone();
        let applied = match apply(&mut speculative, op, source, merge) {
            Ok(applied) => applied,
            Err(rejection) => return vec![rejection],
        };
        let affected: Option<&Item> = speculative.lookup(&applied.item_id);
        let ctx = self.context(&speculative.artifact);

        let mut violations = Vec::new();
        for rule in self.enabled() {
            let findings = match rule.check {
                Check::Item(check) => match affected {
                    Some(item) if item.is_active() => check(&ctx, item),
                    _ => Vec::new(),
                },
                Check::Section(section, check) if section == op.section => check(&ctx),
                Check::Section(..) | Check::Document(_) => Vec::new(),
            };
            violations.extend(stamp(rule, findings));
        }
        violations
    }
}

fn stamp(rule: &RuleSpec, findings: Vec<Finding>) -> impl Iterator<Item = Violation> + '_ {
    findings
        .into_iter()
        .map(move |f| Violation::new(rule.id, rule.severity, f.message, f.location))
}
