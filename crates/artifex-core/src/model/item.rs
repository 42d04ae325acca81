use crate::ids::ItemId;
use crate::model::anchor::Anchor;
use crate::model::Section;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Lifecycle state of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Active,
    Killed,
}

impl std::fmt::Display for ItemState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemState::Active => f.write_str("active"),
            ItemState::Killed => f.write_str("killed"),
        }
    }
}

/// A reference to an item in another session, stored verbatim
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CrossRef {
    pub session: String,
    pub item: String,
    pub relation: String,
}

/// Relations a cross-session reference may declare
pub const KNOWN_RELATIONS: [&str; 6] = [
    "supports",
    "refutes",
    "extends",
    "supersedes",
    "duplicates",
    "related",
];

/// An addressable unit inside a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub state: ItemState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kill_reason: Option<String>,
    pub fields: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<CrossRef>,
    /// Message that created the item
    pub created_by: String,
    /// Number of EDITs applied since creation
    #[serde(default)]
    pub revision: u32,
}

impl Item {
    pub fn new(id: ItemId, created_by: impl Into<String>) -> Self {
        Self {
            id,
            state: ItemState::Active,
            kill_reason: None,
            fields: BTreeMap::new(),
            references: Vec::new(),
            created_by: created_by.into(),
            revision: 0,
        }
    }

    pub fn section(&self) -> Section {
        self.id.section()
    }

    pub fn is_active(&self) -> bool {
        self.state == ItemState::Active
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.fields.get(name), Some(Value::Bool(true)))
    }

    /// Raw `anchors` entries; non-string entries are rendered as JSON so they
    /// surface as unrecognized citations instead of disappearing.
    pub fn anchor_strings(&self) -> Vec<String> {
        match self.fields.get("anchors") {
            Some(Value::Array(values)) => values
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            Some(Value::String(single)) => vec![single.clone()],
            _ => Vec::new(),
        }
    }

    pub fn anchors(&self) -> Vec<Anchor> {
        self.anchor_strings()
            .iter()
            .map(|raw| Anchor::classify(raw))
            .collect()
    }

    /// Ids this item points at inside its own artifact, with the field each
    /// came from: `discriminates` entries, `predictions` keys, and
    /// `conflicts_with` entries.
    pub fn local_references(&self) -> Vec<(&'static str, String)> {
        let mut refs = Vec::new();
        for field in ["discriminates", "conflicts_with"] {
            if let Some(Value::Array(values)) = self.fields.get(field) {
                for value in values {
                    if let Some(raw) = value.as_str() {
                        refs.push((field, raw.to_string()));
                    }
                }
            }
        }
        if let Some(Value::Object(map)) = self.fields.get("predictions") {
            for key in map.keys() {
                refs.push(("predictions", key.clone()));
            }
        }
        refs
    }

    /// Concatenated text of all string fields, for label checks
    pub fn text(&self) -> String {
        let mut out = String::new();
        for value in self.fields.values() {
            collect_text(value, &mut out);
        }
        out
    }
}

fn collect_text(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => {
            out.push_str(s);
            out.push('\n');
        }
        Value::Array(values) => values.iter().for_each(|v| collect_text(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_text(v, out)),
        _ => {}
    }
}
