//! Markdown and text rendering

pub mod artifact_render;
pub mod report_render;

pub use artifact_render::{render_artifact, render_snapshot};
pub use report_render::render_report;
