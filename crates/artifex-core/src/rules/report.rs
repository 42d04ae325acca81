use crate::model::{Severity, Violation};
use serde::{Deserialize, Serialize};

/// Machine-readable validation result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub passed: bool,
}

impl ValidationReport {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        let count = |severity| violations.iter().filter(|v| v.severity == severity).count();
        let error_count = count(Severity::Error);
        let warning_count = count(Severity::Warning);
        let info_count = count(Severity::Info);
        Self {
            error_count,
            warning_count,
            info_count,
            passed: error_count == 0,
            violations,
        }
    }

    /// Compile report: pipeline rejections first, then linter findings
    pub fn compile(pipeline: Vec<Violation>, lint: Vec<Violation>) -> Self {
        let mut all = pipeline;
        all.extend(lint);
        Self::from_violations(all)
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.severity == severity)
    }

    pub fn has_rule(&self, rule_id: &str) -> bool {
        self.violations.iter().any(|v| v.rule_id == rule_id)
    }

    pub fn count_rule(&self, rule_id: &str) -> usize {
        self.violations.iter().filter(|v| v.rule_id == rule_id).count()
    }
}
