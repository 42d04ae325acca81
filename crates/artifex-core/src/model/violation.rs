use crate::model::Section;
use serde::{Deserialize, Serialize};

/// Finding severity; only `Error` blocks publish
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
            Severity::Info => f.write_str("info"),
        }
    }
}

/// Where a finding points
///
/// Artifact findings fill `section`/`item`/`field`; rejected deltas fill
/// `message_id` and the 1-based delta `block` within the message.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<usize>,
}

impl Location {
    pub fn document() -> Self {
        Self::default()
    }

    pub fn section(section: Section) -> Self {
        Self {
            section: Some(section),
            ..Self::default()
        }
    }

    pub fn item(section: Section, item: impl Into<String>) -> Self {
        Self {
            section: Some(section),
            item: Some(item.into()),
            ..Self::default()
        }
    }

    pub fn block(message_id: impl Into<String>, block: usize) -> Self {
        Self {
            message_id: Some(message_id.into()),
            block: Some(block),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_message(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut wrote = false;
        if let Some(section) = &self.section {
            write!(f, "{}", section)?;
            wrote = true;
        }
        if let Some(item) = &self.item {
            write!(f, "{}{}", if wrote { "/" } else { "" }, item)?;
            wrote = true;
        }
        if let Some(field) = &self.field {
            write!(f, "{}{}", if wrote { "." } else { "" }, field)?;
            wrote = true;
        }
        if let Some(message_id) = &self.message_id {
            write!(f, "{}message {}", if wrote { " @ " } else { "" }, message_id)?;
            wrote = true;
        }
        if let Some(block) = self.block {
            write!(f, " block {}", block)?;
        }
        if !wrote {
            f.write_str("document")?;
        }
        Ok(())
    }
}

/// A single finding with a stable rule id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
}

impl Violation {
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            location,
        }
    }

    /// Pipeline rejections (parse and merge) are warnings
    pub fn rejection(rule_id: &str, message: impl Into<String>, location: Location) -> Self {
        Self::new(rule_id, Severity::Warning, message, location)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.rule_id, self.location, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display_forms() {
        assert_eq!(Location::document().to_string(), "document");
        assert_eq!(
            Location::item(Section::HypothesisSlate, "H2")
                .with_field("anchors")
                .to_string(),
            "hypothesis_slate/H2.anchors"
        );
        assert_eq!(Location::block("m-4", 2).to_string(), "message m-4 block 2");
    }

    #[test]
    fn severity_orders_errors_first() {
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
    }
}
