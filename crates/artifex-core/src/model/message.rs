use crate::model::{Operation, Violation};
use artifex_core_types::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An inbound message as delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
    pub session_id: SessionId,
    /// Routing hint supplied by the transport (`kickoff`, `delta`, `close`, ...)
    #[serde(default)]
    pub subject: String,
    pub body: String,
}

/// A parsed message as recorded in the log
///
/// `sequence` is the arrival order assigned by the log and breaks ties
/// between equal timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub sequence: u64,
    pub message_id: String,
    pub session_id: SessionId,
    pub sender: String,
    pub subject: String,
    pub timestamp: DateTime<Utc>,
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub parse_violations: Vec<Violation>,
}

impl LogEntry {
    /// Parse a message into a log entry at `sequence`
    pub fn from_message(message: &Message, sequence: u64) -> Self {
        let parsed = crate::delta::parse_message(&message.id, &message.body);
        Self {
            sequence,
            message_id: message.id.clone(),
            session_id: message.session_id.clone(),
            sender: message.sender.clone(),
            subject: message.subject.clone(),
            timestamp: message.timestamp,
            operations: parsed.operations,
            parse_violations: parsed.violations,
        }
    }

    pub fn is_close(&self) -> bool {
        self.subject.trim().eq_ignore_ascii_case("close")
    }
}
