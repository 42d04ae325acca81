//! Error handling for artifex-store
//!
//! Wraps artifex-core ExError with store-specific helpers

use artifex_core::errors::{ExError, ExErrorKind};
use artifex_core_types::SessionId;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_entity_id(migration_id)
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a CAS collision error
pub fn cas_collision(digest: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("cas_write")
        .with_entity_id(digest)
        .with_message(format!("CAS collision for digest {}", digest))
}

/// Create a CAS missing blob error
pub fn cas_missing(digest: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("cas_read")
        .with_entity_id(digest)
        .with_message(format!("CAS blob not found for digest {}", digest))
}

/// Create a transcript validation error
pub fn transcript_invalid(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidTranscript)
        .with_op("transcript_parse")
        .with_message(reason.to_string())
}

/// A message id already recorded under another session
pub fn message_session_mismatch(message_id: &str, existing: &str, incoming: &SessionId) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("append_message")
        .with_entity_id(message_id)
        .with_session_id(incoming.clone())
        .with_message(format!("Message already recorded in session {}", existing))
}

/// Another writer claimed the snapshot version first
pub fn version_conflict(session_id: &SessionId, version: u32, expected: u32) -> ExError {
    ExError::new(ExErrorKind::VersionConflict)
        .with_op("persist_snapshot")
        .with_session_id(session_id.clone())
        .with_version(version)
        .with_message(format!("Next free version is {}", expected))
}

/// A stored row that no longer decodes
pub fn corrupt_row(op: &str, entity_id: &str, reason: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::CorruptLog)
        .with_op(op.to_string())
        .with_entity_id(entity_id)
        .with_message(reason.to_string())
}

/// Create a serialization error
pub fn serialization(op: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(op.to_string())
        .with_message(err.to_string())
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
