use crate::config::LintConfig;
use crate::ids::ItemId;
use crate::model::{Artifact, Item};
use std::collections::BTreeMap;

/// What a resolver knows about a remote item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStatus {
    Active,
    Killed,
    Missing,
    /// The resolver cannot tell (remote session not compiled, no access)
    Unknown,
}

/// Looks up items in other sessions for the cross-session audit (W009)
///
/// The merge never calls this; only the linter does, and an `Unknown`
/// answer is never reported.
pub trait RemoteResolver {
    fn resolve(&self, session: &str, item: &str) -> RemoteStatus;
}

/// Resolver that knows nothing; cross-session audit becomes a no-op
pub struct NoopResolver;

impl RemoteResolver for NoopResolver {
    fn resolve(&self, _session: &str, _item: &str) -> RemoteStatus {
        RemoteStatus::Unknown
    }
}

/// Resolver backed by a fixed table, keyed by `(session, item)`
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    known: BTreeMap<(String, String), RemoteStatus>,
    /// Sessions whose full item set is in the table; unknown items in
    /// these resolve to `Missing` instead of `Unknown`
    complete: Vec<String>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, session: &str, item: &str, status: RemoteStatus) -> Self {
        self.known
            .insert((session.to_string(), item.to_string()), status);
        self
    }

    /// Register every item of a compiled remote artifact
    pub fn with_artifact(mut self, artifact: &Artifact) -> Self {
        let session = artifact.session_id.to_string();
        for item in artifact.items() {
            let status = if item.is_active() {
                RemoteStatus::Active
            } else {
                RemoteStatus::Killed
            };
            self.known
                .insert((session.clone(), item.id.to_string()), status);
        }
        self.complete.push(session);
        self
    }
}

impl RemoteResolver for StaticResolver {
    fn resolve(&self, session: &str, item: &str) -> RemoteStatus {
        if let Some(status) = self.known.get(&(session.to_string(), item.to_string())) {
            return *status;
        }
        if self.complete.iter().any(|s| s == session) {
            RemoteStatus::Missing
        } else {
            RemoteStatus::Unknown
        }
    }
}

/// Everything a rule check may read
pub struct LintContext<'a> {
    pub artifact: &'a Artifact,
    pub config: &'a LintConfig,
    pub resolver: &'a dyn RemoteResolver,
}

impl<'a> LintContext<'a> {
    /// Count for counting rules, honoring `count_killed`
    pub fn counted(&self, section: crate::model::Section) -> usize {
        self.artifact.count(section, self.config.count_killed)
    }

    /// Resolve a raw local reference
    pub fn resolve_local(&self, raw: &str) -> Option<&'a Item> {
        ItemId::parse(raw).and_then(|id| self.artifact.find(&id))
    }
}
