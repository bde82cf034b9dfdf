//! Core types produced by a comparison
//!
//! The serialized shape of `DiffResult` is the wire contract consumed by
//! external reporters; field names must not change.

use crate::compat::categories::ChangeCategory;
use serde::Serialize;

/// Direction of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

/// One detected difference between two documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    /// The API path, e.g. `/users/{id}`
    pub path: String,
    /// The method key as written in the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Human-readable summary, for display only
    pub description: String,
    pub is_breaking: bool,
    #[serde(skip)]
    pub category: ChangeCategory,
}

impl Change {
    /// Creates a change whose breaking flag follows from its category.
    pub fn new(
        kind: ChangeKind,
        category: ChangeCategory,
        path: &str,
        method: &str,
        description: String,
    ) -> Self {
        Self {
            kind,
            path: path.to_string(),
            method: Some(method.to_string()),
            description,
            is_breaking: category.is_breaking(),
            category,
        }
    }
}

/// A breaking change together with remediation guidance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakingChange {
    pub path: String,
    pub method: String,
    pub reason: String,
    pub migration: String,
    #[serde(skip)]
    pub category: ChangeCategory,
}

impl BreakingChange {
    /// Projects a breaking change, using `reason` as the stated cause.
    pub fn from_change(change: &Change, reason: String) -> Self {
        Self {
            path: change.path.clone(),
            method: change.method.clone().unwrap_or_default(),
            reason,
            migration: change.category.migration_hint().to_string(),
            category: change.category,
        }
    }
}

/// Counts over a comparison
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub added_endpoints: usize,
    pub removed_endpoints: usize,
    pub modified_endpoints: usize,
    pub breaking_changes: usize,
}

/// Full result of comparing two documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    pub old_version: String,
    pub new_version: String,
    pub changes: Vec<Change>,
    pub breaking: Vec<BreakingChange>,
    pub summary: Summary,
}

impl DiffResult {
    /// Create a new empty result
    pub fn new(old_version: String, new_version: String) -> Self {
        Self {
            old_version,
            new_version,
            changes: Vec::new(),
            breaking: Vec::new(),
            summary: Summary::default(),
        }
    }

    /// Records a change, keeping the breaking list and counter in step.
    pub(crate) fn push_change(&mut self, change: Change, reason: impl FnOnce(&Change) -> String) {
        if change.is_breaking {
            self.breaking
                .push(BreakingChange::from_change(&change, reason(&change)));
            self.summary.breaking_changes += 1;
        }
        self.changes.push(change);
    }

    pub fn has_breaking_changes(&self) -> bool {
        self.summary.breaking_changes > 0
    }

    /// True when the documents did not differ in any compared aspect
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
