use artifex_core_types::{RequestId, SessionId};
use thiserror::Error;

/// Result type alias using ArtifexError
pub type Result<T> = std::result::Result<T, ArtifexError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI/exit-code mapping.
///
/// Untrusted input (message bodies, delta blocks) never surfaces here; it is
/// reported as lint violations instead. These kinds cover the failures that
/// remain: configuration, persistence, and broken internal invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    InvalidTranscript,
    InvalidConfig,
    NotFound,

    // Engine state
    CorruptLog,
    SnapshotChainBroken,
    VersionConflict,
    PublishBlocked,
    DeterminismViolation,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Concurrency,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidTranscript => "ERR_INVALID_TRANSCRIPT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::CorruptLog => "ERR_CORRUPT_LOG",
            ExErrorKind::SnapshotChainBroken => "ERR_SNAPSHOT_CHAIN_BROKEN",
            ExErrorKind::VersionConflict => "ERR_VERSION_CONFLICT",
            ExErrorKind::PublishBlocked => "ERR_PUBLISH_BLOCKED",
            ExErrorKind::DeterminismViolation => "ERR_DETERMINISM_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the failure is attributable to the caller's input
    /// (unreadable transcript, bad config, unknown session) rather than to
    /// the engine or its storage.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidInput
                | ExErrorKind::InvalidTranscript
                | ExErrorKind::InvalidConfig
                | ExErrorKind::NotFound
        )
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    session_id: Option<SessionId>,
    version: Option<u32>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            session_id: None,
            version: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (message id, item id, digest, ...)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add session context
    pub fn with_session_id(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Add snapshot version context
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the session context, if any
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Get the snapshot version context, if any
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(session_id) = &self.session_id {
            write!(f, " (session: {})", session_id)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(version) = self.version {
            write!(f, " (version: {})", version)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for the pure engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArtifexError {
    /// The operation log violates an ordering or identity invariant
    #[error("Corrupt operation log: {reason}")]
    CorruptLog { reason: String },

    /// Two log entries share the same arrival sequence
    #[error("Duplicate log sequence {sequence} (messages {first} and {second})")]
    DuplicateSequence {
        sequence: u64,
        first: String,
        second: String,
    },

    /// A log entry belongs to a different session than the one being merged
    #[error("Log entry {message_id} belongs to session {found}, expected {expected}")]
    ForeignSession {
        message_id: String,
        expected: String,
        found: String,
    },

    /// Snapshot versions are not contiguous
    #[error("Snapshot chain broken: expected version {expected}, found {found}")]
    SnapshotChainBroken { expected: u32, found: u32 },

    /// A snapshot cursor moved backwards
    #[error("Snapshot cursor {cursor} precedes previous cursor {previous}")]
    CursorRegression { cursor: u64, previous: u64 },

    /// Publish requested for a snapshot with error-severity findings
    #[error("Snapshot v{version} is not publishable: {error_count} error(s)")]
    PublishBlocked { version: u32, error_count: usize },

    /// Configuration could not be parsed or is inconsistent
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from ArtifexError to ExError
impl From<ArtifexError> for ExError {
    fn from(err: ArtifexError) -> Self {
        match err {
            ArtifexError::CorruptLog { reason } => ExError::new(ExErrorKind::CorruptLog)
                .with_op("merge")
                .with_message(reason),
            ArtifexError::DuplicateSequence {
                sequence,
                first,
                second,
            } => ExError::new(ExErrorKind::CorruptLog)
                .with_op("merge")
                .with_entity_id(second)
                .with_message(format!(
                    "Sequence {} already used by message {}",
                    sequence, first
                )),
            ArtifexError::ForeignSession {
                message_id,
                expected,
                found,
            } => ExError::new(ExErrorKind::CorruptLog)
                .with_op("merge")
                .with_entity_id(message_id)
                .with_session_id(SessionId::new(expected))
                .with_message(format!("Entry belongs to session {}", found)),
            ArtifexError::SnapshotChainBroken { expected, found } => {
                ExError::new(ExErrorKind::SnapshotChainBroken)
                    .with_op("compile_snapshot")
                    .with_version(found)
                    .with_message(format!("Expected version {}", expected))
            }
            ArtifexError::CursorRegression { cursor, previous } => {
                ExError::new(ExErrorKind::SnapshotChainBroken)
                    .with_op("compile_snapshot")
                    .with_message(format!(
                        "Cursor {} precedes previous cursor {}",
                        cursor, previous
                    ))
            }
            ArtifexError::PublishBlocked {
                version,
                error_count,
            } => ExError::new(ExErrorKind::PublishBlocked)
                .with_op("publish")
                .with_version(version)
                .with_message(format!("{} error-severity finding(s)", error_count)),
            ArtifexError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }
            ArtifexError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
            ArtifexError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to ArtifexError
impl From<serde_json::Error> for ArtifexError {
    fn from(err: serde_json::Error) -> Self {
        ArtifexError::Serialization {
            message: err.to_string(),
        }
    }
}
