//! Engine commands
//!
//! Each public command owns its log lines: one `start`, then `end` or
//! `end_error`, with the elapsed time. Helpers below them stay silent.

pub mod compile;
pub mod diff;
pub mod ingest;
pub mod lint;
pub mod preview;
pub mod query;
