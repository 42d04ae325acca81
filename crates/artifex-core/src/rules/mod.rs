//! Rule-based linter
//!
//! Rules are registry entries (`RuleSpec`) holding an id, severity, scope
//! and a check function. The runner in [`validation`] walks the catalog in
//! registration order, so adding or disabling a rule never touches control
//! flow.

pub mod catalog;
pub mod context;
pub mod document;
pub mod invariants;
pub mod provenance;
pub mod references;
pub mod report;
pub mod structural;
pub mod validation;

pub use catalog::{Check, Finding, RuleCatalog, RuleSpec, Scope};
pub use context::{LintContext, NoopResolver, RemoteResolver, RemoteStatus, StaticResolver};
pub use report::ValidationReport;
pub use validation::Linter;
