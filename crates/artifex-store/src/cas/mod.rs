//! Content-addressed blob store for compiled snapshots
//!
//! Blobs are named by their SHA-256 hex digest and live under a two-char
//! shard directory. Writes go through a temp file and a rename, so a reader
//! never sees a partial blob.

mod atomic;
mod fs_store;
mod sharding;

pub use fs_store::FsStore;
