//! The seven fixed artifact sections and their item schemas

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A fixed artifact section
///
/// Declaration order is the render and serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    ResearchThread,
    HypothesisSlate,
    PredictionsTable,
    DiscriminativeTests,
    AssumptionLedger,
    AnomalyRegister,
    AdversarialCritique,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::ResearchThread,
        Section::HypothesisSlate,
        Section::PredictionsTable,
        Section::DiscriminativeTests,
        Section::AssumptionLedger,
        Section::AnomalyRegister,
        Section::AdversarialCritique,
    ];

    /// Name used in delta blocks and serialized artifacts
    pub fn wire_name(&self) -> &'static str {
        match self {
            Section::ResearchThread => "research_thread",
            Section::HypothesisSlate => "hypothesis_slate",
            Section::PredictionsTable => "predictions_table",
            Section::DiscriminativeTests => "discriminative_tests",
            Section::AssumptionLedger => "assumption_ledger",
            Section::AnomalyRegister => "anomaly_register",
            Section::AdversarialCritique => "adversarial_critique",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.wire_name() == name)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::ResearchThread => "Research Thread",
            Section::HypothesisSlate => "Hypothesis Slate",
            Section::PredictionsTable => "Predictions Table",
            Section::DiscriminativeTests => "Discriminative Tests",
            Section::AssumptionLedger => "Assumption Ledger",
            Section::AnomalyRegister => "Anomaly Register",
            Section::AdversarialCritique => "Adversarial Critique",
        }
    }

    /// Item id prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            Section::ResearchThread => "RT",
            Section::HypothesisSlate => "H",
            Section::PredictionsTable => "P",
            Section::DiscriminativeTests => "T",
            Section::AssumptionLedger => "A",
            Section::AnomalyRegister => "X",
            Section::AdversarialCritique => "C",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.prefix() == prefix)
    }

    /// Fields an ADD must carry and a live item must keep
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Section::ResearchThread => &["statement"],
            Section::HypothesisSlate => &["name", "claim"],
            Section::PredictionsTable => &["condition", "predictions"],
            Section::DiscriminativeTests => &["name", "procedure", "discriminates"],
            Section::AssumptionLedger => &["name", "statement"],
            Section::AnomalyRegister => &["name", "observation"],
            Section::AdversarialCritique => &["name", "attack"],
        }
    }

    /// Check a required field's value has the expected shape.
    ///
    /// `predictions` maps hypothesis ids to outcomes and `discriminates`
    /// lists hypothesis ids; every other required field is text.
    pub fn field_has_expected_shape(&self, field: &str, value: &Value) -> bool {
        match (self, field) {
            (Section::PredictionsTable, "predictions") => value.is_object(),
            (Section::DiscriminativeTests, "discriminates") => value.is_array(),
            _ => value.is_string(),
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Whether a field value counts as present: not null, and not an empty
/// string, array or object.
pub fn field_is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(_) => true,
    }
}
