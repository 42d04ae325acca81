//! Append-only message log
//!
//! The log is the only mutable record of a session. Every derived state
//! (artifact, lint report, snapshot) is recomputed from it.
//!
//! ## Responsibilities
//!
//! - Record each message and its parsed operations atomically
//! - Assign the arrival `seq` used as the merge tie-break
//! - Serve a consistent prefix of a session's log for compiles
//!
//! ## Non-Responsibilities
//!
//! - Merging or linting (handled by `artifex-core`)
//! - Per-session serialization (handled by `artifex-engine`)

pub mod append;
pub mod read;

pub use append::{append_message, AppendOutcome};
pub use read::{list_sessions, read_log, read_session, LogView, SessionView};
