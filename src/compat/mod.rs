//! Breaking change detection between two OpenAPI documents
//!
//! The engine compares path and operation maps, the handlers inspect the
//! operations present on both sides, and every change is tagged with a
//! category that drives its breaking flag and migration hint.

pub mod categories;
pub mod engine;
pub mod handlers;
pub mod rules;
pub mod types;

pub use categories::ChangeCategory;
pub use engine::{DiffConfig, DiffEngine};
pub use rules::{RuleDescriptor, RuleKind, Severity};
pub use types::{BreakingChange, Change, ChangeKind, DiffResult, Summary};
