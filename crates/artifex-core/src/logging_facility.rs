//! Structured logging facility for Artifex
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use artifex_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Engine boundaries (`ingest_message`, `compile_session`, ...) own the
//! start/end pair; the pure pipeline below them only emits `debug!` events
//! for rejected operations.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
