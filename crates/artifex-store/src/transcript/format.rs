//! Transcript format v0 schema

use artifex_core::model::Message;
use artifex_core_types::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level transcript file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    pub session_id: String,

    /// Messages in delivery order
    #[serde(default)]
    pub messages: Vec<TranscriptMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptMessage {
    pub id: String,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

impl TranscriptV0 {
    pub fn session(&self) -> SessionId {
        SessionId::new(self.session_id.trim())
    }

    /// Messages bound to this transcript's session, in file order
    pub fn to_messages(&self) -> Vec<Message> {
        let session_id = self.session();
        self.messages
            .iter()
            .map(|m| Message {
                id: m.id.clone(),
                sender: m.sender.clone(),
                timestamp: m.timestamp,
                session_id: session_id.clone(),
                subject: m.subject.clone(),
                body: m.body.clone(),
            })
            .collect()
    }
}
