//! Engine configuration (`artifex.toml`)
//!
//! Missing fields use defaults; a missing file is all defaults. Unknown
//! keys are rejected so a typo cannot silently disable a rule.

use crate::errors::{ArtifexError, Result};
use crate::logging_facility::Profile;
use crate::model::Section;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifexConfig {
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub lint: LintConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// MergeConfig
// ---------------------------------------------------------------------------

/// Section capacity limits enforced on ADD
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeConfig {
    #[serde(default = "default_max_items")]
    pub default_max_items: usize,
    /// Per-section overrides keyed by wire name
    #[serde(default)]
    pub max_items: BTreeMap<String, usize>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            default_max_items: default_max_items(),
            max_items: BTreeMap::new(),
        }
    }
}

impl MergeConfig {
    /// Maximum active item count for `section`
    ///
    /// An explicit override wins; otherwise the research thread holds one
    /// item and every other section `default_max_items`.
    pub fn max_items(&self, section: Section) -> usize {
        if let Some(limit) = self.max_items.get(section.wire_name()) {
            return *limit;
        }
        match section {
            Section::ResearchThread => 1,
            _ => self.default_max_items,
        }
    }
}

const fn default_max_items() -> usize {
    64
}

// ---------------------------------------------------------------------------
// LintConfig
// ---------------------------------------------------------------------------

/// Linter thresholds and rule switches
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    /// Highest valid `§N` anchor in the transcript corpus
    #[serde(default = "default_corpus_max_anchor")]
    pub corpus_max_anchor: u32,
    #[serde(default = "default_min_hypotheses")]
    pub min_hypotheses: usize,
    #[serde(default = "default_max_hypotheses")]
    pub max_hypotheses: usize,
    #[serde(default = "default_min_tests")]
    pub min_tests: usize,
    #[serde(default = "default_min_critiques")]
    pub min_critiques: usize,
    /// Count killed items in the counting rules (E003, E005, W001, W005)
    #[serde(default)]
    pub count_killed: bool,
    /// Rule ids to skip
    #[serde(default)]
    pub disabled: BTreeSet<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            corpus_max_anchor: default_corpus_max_anchor(),
            min_hypotheses: default_min_hypotheses(),
            max_hypotheses: default_max_hypotheses(),
            min_tests: default_min_tests(),
            min_critiques: default_min_critiques(),
            count_killed: false,
            disabled: BTreeSet::new(),
        }
    }
}

const fn default_corpus_max_anchor() -> u32 {
    236
}

const fn default_min_hypotheses() -> usize {
    3
}

const fn default_max_hypotheses() -> usize {
    6
}

const fn default_min_tests() -> usize {
    2
}

const fn default_min_critiques() -> usize {
    1
}

// ---------------------------------------------------------------------------
// LoggingConfig
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_profile")]
    pub profile: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
        }
    }
}

fn default_profile() -> String {
    "development".to_owned()
}

impl LoggingConfig {
    pub fn profile(&self) -> Profile {
        Profile::from_name(&self.profile).unwrap_or(Profile::Development)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl ArtifexConfig {
    /// Load configuration from a TOML file; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on unreadable files, invalid TOML, unknown keys,
    /// or inconsistent values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ArtifexError::InvalidConfig {
                    reason: format!("{}: could not read file: {}", path.display(), e),
                })
            }
        };
        Self::parse(&contents).map_err(|e| match e {
            ArtifexError::InvalidConfig { reason } => ArtifexError::InvalidConfig {
                reason: format!("{}: {}", path.display(), reason),
            },
            other => other,
        })
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on invalid TOML, unknown keys, or values that
    /// fail [`ArtifexConfig::validate`].
    pub fn parse(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| {
            let mut reason = e.message().to_owned();
            if let Some(span) = e.span() {
                let line = toml_str[..span.start].matches('\n').count() + 1;
                reason = format!("line {}: {}", line, reason);
            }
            ArtifexError::InvalidConfig { reason }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` for unknown section names, unknown rule ids,
    /// unknown logging profiles, or inverted hypothesis bounds.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = self
            .merge
            .max_items
            .keys()
            .find(|name| Section::from_wire(name).is_none())
        {
            return Err(ArtifexError::InvalidConfig {
                reason: format!("merge.max_items: unknown section '{}'", name),
            });
        }
        let catalog = crate::rules::RuleCatalog::standard();
        if let Some(id) = self.lint.disabled.iter().find(|id| !catalog.contains(id)) {
            return Err(ArtifexError::InvalidConfig {
                reason: format!("lint.disabled: unknown rule '{}'", id),
            });
        }
        if self.lint.min_hypotheses > self.lint.max_hypotheses {
            return Err(ArtifexError::InvalidConfig {
                reason: "lint.min_hypotheses exceeds lint.max_hypotheses".to_string(),
            });
        }
        if Profile::from_name(&self.logging.profile).is_none() {
            return Err(ArtifexError::InvalidConfig {
                reason: format!("logging.profile: unknown profile '{}'", self.logging.profile),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_all_fields() {
        let cfg = ArtifexConfig::default();
        assert_eq!(cfg.merge.max_items(Section::ResearchThread), 1);
        assert_eq!(cfg.merge.max_items(Section::HypothesisSlate), 64);
        assert_eq!(cfg.lint.corpus_max_anchor, 236);
        assert_eq!(cfg.lint.min_hypotheses, 3);
        assert_eq!(cfg.lint.max_hypotheses, 6);
        assert_eq!(cfg.lint.min_tests, 2);
        assert_eq!(cfg.lint.min_critiques, 1);
        assert!(!cfg.lint.count_killed);
        assert!(cfg.lint.disabled.is_empty());
        assert_eq!(cfg.logging.profile(), Profile::Development);
    }

    #[test]
    fn parse_empty_string_is_defaults() {
        assert_eq!(ArtifexConfig::parse("").unwrap(), ArtifexConfig::default());
    }

    #[test]
    fn parse_full_document() {
        let cfg = ArtifexConfig::parse(
            r#"
[merge]
default_max_items = 10
[merge.max_items]
anomaly_register = 3

[lint]
corpus_max_anchor = 120
count_killed = true
disabled = ["I003"]

[logging]
profile = "production"
"#,
        )
        .unwrap();
        assert_eq!(cfg.merge.max_items(Section::AnomalyRegister), 3);
        assert_eq!(cfg.merge.max_items(Section::HypothesisSlate), 10);
        assert_eq!(cfg.merge.max_items(Section::ResearchThread), 1);
        assert_eq!(cfg.lint.corpus_max_anchor, 120);
        assert!(cfg.lint.count_killed);
        assert!(cfg.lint.disabled.contains("I003"));
        assert_eq!(cfg.logging.profile(), Profile::Production);
    }

    #[test]
    fn unknown_key_reports_line() {
        let err = ArtifexConfig::parse("[lint]\nmin_hypothesis = 2\n").unwrap_err();
        let ArtifexError::InvalidConfig { reason } = err else {
            panic!("expected InvalidConfig");
        };
        assert!(reason.contains("line 2"), "{}", reason);
    }

    #[test]
    fn unknown_section_and_rule_are_rejected() {
        assert!(ArtifexConfig::parse("[merge.max_items]\nappendix = 2\n").is_err());
        assert!(ArtifexConfig::parse("[lint]\ndisabled = [\"E999\"]\n").is_err());
    }

    #[test]
    fn load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ArtifexConfig::load(&dir.path().join("artifex.toml")).unwrap();
        assert_eq!(cfg, ArtifexConfig::default());
    }
}
