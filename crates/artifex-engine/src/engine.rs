//! Engine handle: store locations, configuration and per-session locks

#![allow(clippy::result_large_err)]

use artifex_core::errors::{ExError, ExErrorKind};
use artifex_core::{ArtifexConfig, RuleCatalog};
use artifex_core_types::SessionId;
use artifex_store::cas::FsStore;
use artifex_store::errors::{io_error, Result};
use rusqlite::Connection;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared by every command; cheap to share across threads behind an `Arc`
///
/// SQLite connections are not shared: each command opens its own, and WAL
/// lets readers proceed while another connection appends.
pub struct Engine {
    db_path: PathBuf,
    cas: FsStore,
    config: ArtifexConfig,
    catalog: RuleCatalog,
    locks: Mutex<HashMap<SessionId, Arc<Mutex<()>>>>,
}

impl Engine {
    /// Open (and migrate) the store with the standard rule catalog
    ///
    /// # Errors
    ///
    /// Invalid configuration, or a store that cannot be created or migrated.
    pub fn open(
        db_path: impl Into<PathBuf>,
        cas_root: impl Into<PathBuf>,
        config: ArtifexConfig,
    ) -> Result<Self> {
        Self::with_catalog(db_path, cas_root, config, RuleCatalog::standard())
    }

    pub fn with_catalog(
        db_path: impl Into<PathBuf>,
        cas_root: impl Into<PathBuf>,
        config: ArtifexConfig,
        catalog: RuleCatalog,
    ) -> Result<Self> {
        config.validate().map_err(ExError::from)?;
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| io_error("create_store_dir", e))?;
        }
        artifex_store::db::open_migrated(&db_path)?;

        Ok(Self {
            db_path,
            cas: FsStore::new(cas_root),
            config,
            catalog,
            locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn cas(&self) -> &FsStore {
        &self.cas
    }

    pub fn config(&self) -> &ArtifexConfig {
        &self.config
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Fresh configured connection for one command
    pub(crate) fn connect(&self) -> Result<Connection> {
        let conn = artifex_store::db::open(&self.db_path)?;
        artifex_store::db::configure(&conn)?;
        Ok(conn)
    }

    /// The lock serializing compiles of `session`
    pub(crate) fn session_lock(&self, session: &SessionId) -> Result<Arc<Mutex<()>>> {
        let mut locks = self.locks.lock().map_err(|_| poisoned(session))?;
        Ok(locks
            .entry(session.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }
}

pub(crate) fn hold<'a>(lock: &'a Mutex<()>, session: &SessionId) -> Result<MutexGuard<'a, ()>> {
    lock.lock().map_err(|_| poisoned(session))
}

fn poisoned(session: &SessionId) -> ExError {
    ExError::new(ExErrorKind::Concurrency)
        .with_op("session_lock")
        .with_session_id(session.clone())
        .with_message("session lock poisoned by a panicked compile")
}
