//! Incremental lint of a message before it is ingested

#![allow(clippy::result_large_err)]

use crate::engine::Engine;
use crate::resolver::StoreResolver;
use artifex_core::apply::apply;
use artifex_core::errors::{ExError, ExErrorKind};
use artifex_core::merge::merge;
use artifex_core::model::{Message, OpSource, Violation};
use artifex_core::snapshot::boundaries;
use artifex_core::{parse_message, Linter};
use artifex_store::log::read_session;
use artifex_store::Result;

impl Engine {
    /// Violations `message` would introduce if appended now
    ///
    /// Parse rejections come first, then each operation's findings in block
    /// order. Operations are checked against the current merged state plus
    /// the earlier operations of the same message. Nothing is written.
    ///
    /// The message is placed after every entry already logged. Ids shown in
    /// findings hold only if it also merges there; a timestamp that sorts
    /// earlier inside the open epoch can shift the ids it receives on ingest.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the message names no session; store failures.
    pub fn preview_message(&self, message: &Message) -> Result<Vec<Violation>> {
        let session = &message.session_id;
        if session.is_empty() {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("preview_message")
                .with_entity_id(message.id.clone())
                .with_message("message has no session"));
        }

        let conn = self.connect()?;
        let read = read_session(&conn, session)?;
        let view = read.log;
        let mut state = merge(
            session,
            &view.entries,
            &boundaries(&read.lineage),
            &self.config().merge,
        )
        .map_err(|e| ExError::from(e).with_session_id(session.clone()))?
        .state;

        let resolver = StoreResolver::new(&conn, self.cas());
        let linter = Linter::new(self.catalog(), &self.config().lint, &resolver);

        let parsed = parse_message(&message.id, &message.body);
        let mut violations = parsed.violations;
        for (index, op) in parsed.operations.iter().enumerate() {
            let source = OpSource {
                message_id: message.id.clone(),
                sender: message.sender.clone(),
                timestamp: message.timestamp,
                sequence: view.cursor + 1,
                index,
            };
            violations.extend(linter.lint_delta(&state, op, &source, &self.config().merge));
            // A rejected op leaves the state untouched; its violation is already recorded.
            let _ = apply(&mut state, op, &source, &self.config().merge);
        }
        Ok(violations)
    }
}
