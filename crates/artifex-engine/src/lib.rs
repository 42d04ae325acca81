//! Artifex Engine - Orchestration layer
//!
//! Coordinates the pure compiler in `artifex-core` with the log and ledger
//! in `artifex-store`. Compiles are serialized per session; different
//! sessions proceed in parallel.

pub mod commands;
pub mod engine;
pub mod resolver;

pub use commands::compile::CompileOutcome;
pub use commands::ingest::IngestSummary;
pub use commands::lint::lint_transcript;
pub use engine::Engine;
pub use resolver::StoreResolver;
