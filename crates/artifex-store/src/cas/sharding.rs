//! Sharding logic for CAS
//!
//! Blobs live under a subdirectory named after the first 2 hex characters
//! of their digest.

use std::path::{Path, PathBuf};

/// For digest "abc123...", returns "<root>/ab/abc123.<ext>"
pub fn shard_path(root: &Path, digest: &str, extension: &str) -> PathBuf {
    let shard = digest.get(..2).unwrap_or(digest);
    root.join(shard).join(format!("{}.{}", digest, extension))
}
