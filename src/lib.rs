pub mod compat;
pub mod document;
pub mod error;
pub mod report;
pub mod spec;

pub use compat::{
    BreakingChange, Change, ChangeCategory, ChangeKind, DiffConfig, DiffEngine, DiffResult, Summary,
};
pub use error::{LoadError, SpecRole};
pub use report::{generate_changelog, generate_migration_guide};
pub use spec::{Compatibility, Spec, compare_files, fingerprint};

use serde_json::Value;

/// Compares two decoded OpenAPI documents.
///
/// `old` is the baseline and `new` the candidate. The comparison is a pure
/// function of its inputs: it never fails, never mutates either document,
/// and returns changes in a stable order (added endpoints, removed
/// endpoints, then per-operation modifications, each sorted by path and
/// method).
///
/// Malformed or partial documents are tolerated; whatever cannot be read is
/// treated as absent.
///
/// # Example
///
/// ```
/// use serde_json::json;
///
/// let old = json!({"info": {"version": "1"}, "paths": {"/a": {"get": {}}}});
/// let new = json!({"info": {"version": "2"}, "paths": {}});
///
/// let diff = openapi_drift::compare(&old, &new);
/// assert_eq!(diff.summary.removed_endpoints, 1);
/// assert!(diff.has_breaking_changes());
/// ```
pub fn compare(old: &Value, new: &Value) -> DiffResult {
    DiffEngine::new().compare(old, new)
}
