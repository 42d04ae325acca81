//! Digest computation for compiled artifacts
//!
//! The artifact digest hashes the canonical JSON of the artifact with its
//! `version` zeroed, so two compiles of the same log prefix agree on the
//! digest even though they carry different version numbers. Canonical means
//! struct field order plus `BTreeMap` key order; no map in the artifact
//! preserves insertion order.

use crate::errors::Result;
use crate::model::Artifact;
use sha2::{Digest, Sha256};

/// Hex SHA-256 of the version-independent artifact content
///
/// # Errors
///
/// Returns `ArtifexError::Serialization` if JSON serialization fails.
pub fn compute_artifact_digest(artifact: &Artifact) -> Result<String> {
    let mut canonical = artifact.clone();
    canonical.version = 0;
    let bytes = serde_json::to_vec(&canonical)?;
    Ok(hash_bytes(&bytes))
}

/// Hex SHA-256 of raw bytes
pub fn hash_bytes(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}
