//! Domain model
//!
//! Everything here is plain data. The artifact is only ever produced by
//! folding the operation log through `merge`; nothing else mutates it.

pub mod anchor;
pub mod artifact;
pub mod item;
pub mod message;
pub mod operation;
pub mod section;
pub mod violation;

pub use anchor::{Anchor, AnchorKind};
pub use artifact::{Artifact, ArtifactStatus};
pub use item::{CrossRef, Item, ItemState};
pub use message::{LogEntry, Message};
pub use operation::{OpKind, OpSource, Operation};
pub use section::Section;
pub use violation::{Location, Severity, Violation};
