//! Cross-session resolution against the latest snapshot of each session

use artifex_core::model::Artifact;
use artifex_core::rules::{RemoteResolver, RemoteStatus};
use artifex_core::ItemId;
use artifex_core_types::SessionId;
use artifex_store::cas::FsStore;
use artifex_store::snapshot::{latest_snapshot, load_snapshot};
use rusqlite::Connection;
use std::cell::RefCell;
use std::collections::HashMap;

/// Answers W009 lookups from the ledger
///
/// Each remote session is loaded at most once per compile. A session with
/// no snapshot, or one that fails to load, resolves to `Unknown`.
pub struct StoreResolver<'a> {
    conn: &'a Connection,
    cas: &'a FsStore,
    cache: RefCell<HashMap<String, Option<Artifact>>>,
}

impl<'a> StoreResolver<'a> {
    pub fn new(conn: &'a Connection, cas: &'a FsStore) -> Self {
        Self {
            conn,
            cas,
            cache: RefCell::new(HashMap::new()),
        }
    }

    fn load(&self, session: &str) -> Option<Artifact> {
        let session_id = SessionId::new(session);
        let loaded = latest_snapshot(self.conn, &session_id)
            .and_then(|record| match record {
                Some(record) => load_snapshot(self.cas, &record).map(Some),
                None => Ok(None),
            });
        match loaded {
            Ok(snapshot) => snapshot.map(|s| s.artifact),
            Err(err) => {
                tracing::warn!(session_id = %session, error = %err, "remote session unavailable");
                None
            }
        }
    }
}

impl RemoteResolver for StoreResolver<'_> {
    fn resolve(&self, session: &str, item: &str) -> RemoteStatus {
        let Some(id) = ItemId::parse(item) else {
            return RemoteStatus::Unknown;
        };
        let mut cache = self.cache.borrow_mut();
        let artifact = cache
            .entry(session.to_string())
            .or_insert_with(|| self.load(session));
        match artifact {
            None => RemoteStatus::Unknown,
            Some(artifact) => match artifact.find(&id) {
                Some(found) if found.is_active() => RemoteStatus::Active,
                Some(_) => RemoteStatus::Killed,
                None => RemoteStatus::Missing,
            },
        }
    }
}
