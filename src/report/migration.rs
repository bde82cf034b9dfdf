//! Migration guide rendering
//!
//! One numbered step per breaking change, in the order the diff reports them.

use crate::compat::categories::ChangeCategory;
use crate::compat::types::{BreakingChange, DiffResult};
use std::fmt::Write;

/// Shown instead of a step list when nothing breaks.
pub const NO_MIGRATION_REQUIRED: &str = "No breaking changes. No migration required.";

/// A single remediation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStep {
    pub title: String,
    pub description: String,
    pub before: Option<String>,
    pub after: Option<String>,
    pub endpoint: String,
    pub method: String,
}

/// Ordered remediation steps between two versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationGuide {
    pub from_version: String,
    pub to_version: String,
    pub steps: Vec<MigrationStep>,
}

/// Step layouts, picked from the category of the breaking change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepTemplate {
    Removal,
    RequiredField,
    Generic,
}

impl StepTemplate {
    fn for_category(category: ChangeCategory) -> Self {
        match category {
            ChangeCategory::EndpointRemoved
            | ChangeCategory::RequestBodyRemoved
            | ChangeCategory::ResponseCodeRemoved
            | ChangeCategory::ParameterRemoved => StepTemplate::Removal,
            ChangeCategory::RequiredFieldAdded | ChangeCategory::RequiredParameterAdded => {
                StepTemplate::RequiredField
            }
            ChangeCategory::RequestBodyRequired | ChangeCategory::EndpointAdded => {
                StepTemplate::Generic
            }
        }
    }
}

impl MigrationStep {
    pub fn from_breaking(breaking: &BreakingChange) -> Self {
        let method = &breaking.method;
        let path = &breaking.path;

        let (title, before, after) = match StepTemplate::for_category(breaking.category) {
            StepTemplate::Removal => (
                format!("Handle removed endpoint: {method} {path}"),
                Some(format!("// Old code using {method} {path}")),
                Some("// Remove or replace with alternative endpoint".to_string()),
            ),
            StepTemplate::RequiredField => (
                format!("Add required field for: {method} {path}"),
                Some("// Request without the new required field".to_string()),
                Some("// Add the new required field to your request".to_string()),
            ),
            StepTemplate::Generic => (format!("Update: {method} {path}"), None, None),
        };

        Self {
            title,
            description: breaking.migration.clone(),
            before,
            after,
            endpoint: path.clone(),
            method: method.clone(),
        }
    }
}

impl MigrationGuide {
    pub fn from_diff(diff: &DiffResult) -> Self {
        Self {
            from_version: diff.old_version.clone(),
            to_version: diff.new_version.clone(),
            steps: diff.breaking.iter().map(MigrationStep::from_breaking).collect(),
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "# Migration Guide: {} → {}\n",
            self.from_version, self.to_version
        );

        if self.steps.is_empty() {
            let _ = writeln!(out, "{NO_MIGRATION_REQUIRED}");
            return out;
        }

        let _ = writeln!(
            out,
            "This guide covers {} breaking change(s) that require updates.\n",
            self.steps.len()
        );

        for (i, step) in self.steps.iter().enumerate() {
            let _ = writeln!(out, "## {}. {}\n", i + 1, step.title);
            let _ = writeln!(out, "**Endpoint:** `{} {}`\n", step.method, step.endpoint);
            let _ = writeln!(out, "{}\n", step.description);

            if let Some(before) = &step.before {
                let _ = writeln!(out, "**Before:**\n```\n{before}\n```\n");
            }
            if let Some(after) = &step.after {
                let _ = writeln!(out, "**After:**\n```\n{after}\n```\n");
            }
        }

        out
    }
}

/// Renders the migration guide for `diff`.
pub fn generate_migration_guide(diff: &DiffResult) -> String {
    MigrationGuide::from_diff(diff).to_markdown()
}
