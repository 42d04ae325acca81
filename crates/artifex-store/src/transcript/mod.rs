//! Transcript files: a session's messages as YAML or JSON
//!
//! ```yaml
//! schema_version: 0
//! session_id: drift-2026-03
//! messages:
//!   - id: m-1
//!     sender: alice
//!     timestamp: 2026-03-01T09:00:00Z
//!     subject: kickoff
//!     body: |
//!       ...
//! ```

pub mod format;
pub mod parser;

pub use format::{TranscriptMessage, TranscriptV0};
pub use parser::{parse_transcript_file, parse_transcript_str, TranscriptFormat};
