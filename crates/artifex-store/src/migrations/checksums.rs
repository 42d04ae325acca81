//! Checksum validation for migrations

use sha2::{Digest, Sha256};

/// SHA256 checksum of a migration's SQL text
pub fn compute_checksum(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
