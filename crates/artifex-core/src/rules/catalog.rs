use crate::model::{Item, Location, Section, Severity};
use crate::rules::context::LintContext;
use crate::rules::{document, invariants, provenance, references, structural};

/// What a rule looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// One active item at a time
    Item,
    /// One section as a whole
    Section(Section),
    /// The whole artifact
    Document,
}

/// One finding of a rule, before the runner stamps id and severity on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub message: String,
    pub location: Location,
}

impl Finding {
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

pub type ItemCheck = fn(&LintContext<'_>, &Item) -> Vec<Finding>;
pub type ContextCheck = fn(&LintContext<'_>) -> Vec<Finding>;

#[derive(Clone, Copy)]
pub enum Check {
    Item(ItemCheck),
    Section(Section, ContextCheck),
    Document(ContextCheck),
}

/// A registered rule
#[derive(Clone)]
pub struct RuleSpec {
    pub id: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub check: Check,
}

impl RuleSpec {
    pub fn scope(&self) -> Scope {
        match self.check {
            Check::Item(_) => Scope::Item,
            Check::Section(section, _) => Scope::Section(section),
            Check::Document(_) => Scope::Document,
        }
    }
}

impl std::fmt::Debug for RuleSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSpec")
            .field("id", &self.id)
            .field("severity", &self.severity)
            .field("scope", &self.scope())
            .finish()
    }
}

/// Ordered rule registry
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: Vec<RuleSpec>,
}

macro_rules! rule {
    ($id:literal, $severity:ident, $description:literal, $check:expr) => {
        RuleSpec {
            id: $id,
            severity: Severity::$severity,
            description: $description,
            check: $check,
        }
    };
}

impl RuleCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard catalog. Ids are stable: contributors are told to fix
    /// "E004" and the same finding must carry the same id next run.
    pub fn standard() -> Self {
        use Section::*;
        let rules = vec![
            rule!("E001", Error, "metadata header incomplete", Check::Document(document::check_metadata)),
            rule!("E002", Error, "exactly one active research thread item", Check::Section(ResearchThread, structural::check_single_thread)),
            rule!("E003", Error, "minimum hypothesis count", Check::Section(HypothesisSlate, structural::check_min_hypotheses)),
            rule!("E004", Error, "a third-alternative hypothesis is required", Check::Section(HypothesisSlate, structural::check_third_alternative)),
            rule!("E005", Error, "minimum discriminative test count", Check::Section(DiscriminativeTests, structural::check_min_tests)),
            rule!("E006", Error, "required field missing", Check::Item(structural::check_required_fields)),
            rule!("E007", Error, "item id format", Check::Document(invariants::check_id_format)),
            rule!("E008", Error, "duplicate item id", Check::Document(invariants::check_duplicate_ids)),
            rule!("E009", Error, "gap in item id sequence", Check::Document(invariants::check_id_gaps)),
            rule!("E010", Error, "cross-reference to unknown item", Check::Item(references::check_unknown_targets)),
            rule!("E011", Error, "quote anchor outside corpus range", Check::Item(provenance::check_anchor_range)),
            rule!("E012", Error, "claim without recognized citation", Check::Item(provenance::check_citation_present)),
            rule!("E013", Error, "unrecognized citation form", Check::Item(provenance::check_citation_forms)),
            rule!("W001", Warning, "maximum hypothesis count", Check::Section(HypothesisSlate, structural::check_max_hypotheses)),
            rule!("W002", Warning, "test without potency check", Check::Item(structural::check_potency)),
            rule!("W003", Warning, "test discriminates fewer than two hypotheses", Check::Item(structural::check_discrimination_width)),
            rule!("W004", Warning, "no scale-check assumption", Check::Section(AssumptionLedger, structural::check_scale_assumption)),
            rule!("W005", Warning, "minimum critique count", Check::Section(AdversarialCritique, structural::check_min_critiques)),
            rule!("W006", Warning, "cross-reference to killed item", Check::Item(references::check_killed_targets)),
            rule!("W007", Warning, "inference-only claim not labeled", Check::Item(provenance::check_inference_label)),
            rule!("W008", Warning, "malformed cross-session reference", Check::Item(references::check_cross_session_form)),
            rule!("W009", Warning, "cross-session reference does not resolve", Check::Item(references::check_cross_session_targets)),
            rule!("I001", Info, "research thread edited", Check::Document(document::check_thread_edited)),
            rule!("I002", Info, "killed items present", Check::Document(document::check_killed_present)),
            rule!("I003", Info, "anomaly register empty", Check::Section(AnomalyRegister, structural::check_anomalies_present)),
            rule!("I004", Info, "cross-session references present", Check::Item(references::check_cross_session_present)),
        ];
        Self { rules }
    }

    /// Add a rule, replacing any rule with the same id in place
    pub fn register(&mut self, rule: RuleSpec) {
        match self.rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    /// Drop a rule; returns whether it was registered
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.id != id);
        self.rules.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&RuleSpec> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }

    /// Registration position, used to order report entries
    pub fn position(&self, id: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.id == id)
    }
}
