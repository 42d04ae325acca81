//! Filesystem-based Content-Addressable Storage
//!
//! Compiled snapshots are stored as JSON blobs keyed by their SHA256.

#![allow(clippy::result_large_err)]

use crate::cas::atomic::atomic_write;
use crate::cas::sharding::shard_path;
use crate::errors::{cas_collision, cas_missing, io_error, Result};
use artifex_core::snapshot::hash_bytes;
use std::fs;
use std::path::{Path, PathBuf};

const BLOB_EXTENSION: &str = "json";

/// Filesystem-based CAS store
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write content and return its digest
    ///
    /// Writing the same bytes twice is a no-op; different bytes under an
    /// existing digest is a collision error.
    pub fn write(&self, content: &[u8]) -> Result<String> {
        let digest = hash_bytes(content);
        let target_path = shard_path(&self.root, &digest, BLOB_EXTENSION);

        if target_path.exists() {
            let existing = fs::read(&target_path).map_err(|e| io_error("read_cas", e))?;
            if existing == content {
                return Ok(digest);
            }
            return Err(cas_collision(&digest));
        }

        atomic_write(&target_path, content)?;
        Ok(digest)
    }

    /// Read a blob, verifying it still hashes to its digest
    pub fn read(&self, digest: &str) -> Result<Vec<u8>> {
        let path = shard_path(&self.root, digest, BLOB_EXTENSION);
        if !path.exists() {
            return Err(cas_missing(digest));
        }
        let content = fs::read(&path).map_err(|e| io_error("read_cas", e))?;
        if hash_bytes(&content) != digest {
            return Err(cas_collision(digest));
        }
        Ok(content)
    }

    pub fn contains(&self, digest: &str) -> bool {
        shard_path(&self.root, digest, BLOB_EXTENSION).exists()
    }
}
