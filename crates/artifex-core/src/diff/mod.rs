//! Snapshot-to-snapshot change summaries
//!
//! Diffs come from the operation log segment between two snapshot cursors,
//! never from comparing rendered text.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compute_delta;
pub use human_summary::render_human_summary;
pub use model::{SectionDelta, SnapshotDelta};
