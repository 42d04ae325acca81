use crate::model::{CrossRef, Section};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OpKind {
    Add,
    Edit,
    Kill,
}

impl OpKind {
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "ADD" => Some(OpKind::Add),
            "EDIT" => Some(OpKind::Edit),
            "KILL" => Some(OpKind::Kill),
            _ => None,
        }
    }
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpKind::Add => f.write_str("ADD"),
            OpKind::Edit => f.write_str("EDIT"),
            OpKind::Kill => f.write_str("KILL"),
        }
    }
}

/// A syntactically valid delta, as recorded in the log
///
/// `target_id` is kept as the raw string; whether it names a live item is
/// decided by the merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operation")]
    pub kind: OpKind,
    pub section: Section,
    pub target_id: Option<String>,
    pub payload: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence_refs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<CrossRef>,
}

impl Operation {
    /// KILL reason, if present and non-blank
    pub fn reason(&self) -> Option<&str> {
        self.payload
            .get("reason")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}

/// Where an operation sits in the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpSource {
    pub message_id: String,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
    pub sequence: u64,
    pub index: usize,
}
