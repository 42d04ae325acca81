//! Atomic write primitives
//!
//! temp→rename, so readers never see a partial blob

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use std::fs;
use std::path::Path;

/// Atomically write bytes to a file
///
/// The temp name is unique per call so concurrent writers of the same blob
/// never share a temp file.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_cas_dir", e))?;
    }

    let temp_path = target_path.with_extension(format!("{}.tmp", uuid::Uuid::new_v4().simple()));

    fs::write(&temp_path, content).map_err(|e| io_error("write_cas_temp", e))?;

    if let Err(e) = fs::rename(&temp_path, target_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error("rename_cas_temp", e));
    }

    Ok(())
}
