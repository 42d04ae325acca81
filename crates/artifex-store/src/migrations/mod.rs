//! Schema migrations
//!
//! Migrations are embedded SQL files applied in order, each in its own
//! transaction. The `schema_version` table records id and checksum; a
//! recorded migration whose checksum no longer matches stops the store
//! from opening.

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
