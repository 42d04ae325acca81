//! Artifex Store - Persistence layer with SQLite, CAS, and transcript import
//!
//! Provides:
//! - SQLite schema with migrations framework
//! - Append-only message/operation log per session
//! - Snapshot ledger with per-session version numbering
//! - Content-addressable storage (CAS) for compiled snapshot blobs
//! - Transcript file parser (YAML/JSON)

pub mod cas;
pub mod db;
pub mod errors;
pub mod log;
pub mod migrations;
pub mod snapshot;
pub mod transcript;

// Re-export key types
pub use errors::Result;
