//! Comparison engine
//!
//! Walks the path/operation maps of two documents and builds a `DiffResult`:
//! additions first, then removals, then per-operation modifications, each in
//! sorted path and method order.

use crate::compat::categories::ChangeCategory;
use crate::compat::handlers::{self, CheckOptions, OperationRef};
use crate::compat::types::{Change, ChangeKind, DiffResult};
use crate::document;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reason recorded on the breaking entry of a removed endpoint
pub const ENDPOINT_REMOVED_REASON: &str = "Endpoint removed";

/// Configuration for a comparison
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Paths to leave out entirely. A trailing `/**` matches the prefix.
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Category ids whose changes are not reported
    #[serde(default)]
    pub except_categories: Vec<String>,
    /// Report a newly required field once even if several media types list it
    #[serde(default)]
    pub dedupe_required_fields: bool,
}

impl DiffConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    /// Load configuration from YAML string
    ///
    /// Settings live under a top-level `drift` key; without it the defaults
    /// apply.
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        #[derive(serde::Deserialize)]
        struct ConfigFile {
            drift: Option<DiffConfig>,
        }

        let config_file: ConfigFile = serde_yaml::from_str(yaml)?;
        let config = config_file.drift.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Rejects unknown category ids.
    pub fn validate(&self) -> anyhow::Result<()> {
        for id in &self.except_categories {
            if ChangeCategory::from_id(id).is_none() {
                anyhow::bail!("Unknown change category in except_categories: {id}");
            }
        }
        Ok(())
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignore.iter().any(|pattern| match pattern.strip_suffix("/**") {
            Some(prefix) => path == prefix || path.starts_with(&format!("{prefix}/")),
            None => path == pattern,
        })
    }

    pub fn is_excepted(&self, category: ChangeCategory) -> bool {
        self.except_categories.iter().any(|id| id == category.id())
    }

    fn check_options(&self) -> CheckOptions {
        CheckOptions {
            dedupe_required_fields: self.dedupe_required_fields,
        }
    }
}

/// Main engine for comparing two specification documents
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    config: DiffConfig,
}

impl DiffEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compares `old` against `new`. Never fails and never mutates either
    /// document.
    pub fn compare(&self, old: &Value, new: &Value) -> DiffResult {
        let mut result = DiffResult::new(document::version(old), document::version(new));

        let old_paths = document::paths(old);
        let new_paths = document::paths(new);

        // Added endpoints
        for (path, methods) in &new_paths {
            if self.config.is_ignored(path) {
                continue;
            }
            let old_methods = old_paths.get(path);
            for method in methods.keys() {
                if old_methods.is_some_and(|m| m.contains_key(method)) {
                    continue;
                }
                let change = Change::new(
                    ChangeKind::Added,
                    ChangeCategory::EndpointAdded,
                    path,
                    method,
                    format!("New endpoint: {method} {path}"),
                );
                if self.record(&mut result, change, |c| c.description.clone()) {
                    result.summary.added_endpoints += 1;
                }
            }
        }

        // Removed endpoints
        for (path, methods) in &old_paths {
            if self.config.is_ignored(path) {
                continue;
            }
            let new_methods = new_paths.get(path);
            for method in methods.keys() {
                if new_methods.is_some_and(|m| m.contains_key(method)) {
                    continue;
                }
                let change = Change::new(
                    ChangeKind::Removed,
                    ChangeCategory::EndpointRemoved,
                    path,
                    method,
                    format!("Removed endpoint: {method} {path}"),
                );
                if self.record(&mut result, change, |_| ENDPOINT_REMOVED_REASON.to_string()) {
                    result.summary.removed_endpoints += 1;
                }
            }
        }

        // Modified endpoints
        for (path, old_methods) in &old_paths {
            if self.config.is_ignored(path) {
                continue;
            }
            let Some(new_methods) = new_paths.get(path) else {
                continue;
            };
            for (method, old_op) in old_methods {
                let Some(new_op) = new_methods.get(method) else {
                    continue;
                };

                let op = OperationRef { path, method };
                let changes =
                    handlers::compare_operations(op, old_op, new_op, self.config.check_options());

                let mut reported = 0;
                for change in changes {
                    if self.record(&mut result, change, |c| c.description.clone()) {
                        reported += 1;
                    }
                }
                if reported > 0 {
                    tracing::debug!(
                        path = %path,
                        method = %method,
                        changes = reported,
                        "operation modified"
                    );
                    result.summary.modified_endpoints += 1;
                }
            }
        }

        tracing::info!(
            old_version = %result.old_version,
            new_version = %result.new_version,
            added = result.summary.added_endpoints,
            removed = result.summary.removed_endpoints,
            modified = result.summary.modified_endpoints,
            breaking = result.summary.breaking_changes,
            "comparison finished"
        );

        result
    }

    /// Adds a change unless its category is excepted. Returns whether it was kept.
    fn record(
        &self,
        result: &mut DiffResult,
        change: Change,
        reason: impl FnOnce(&Change) -> String,
    ) -> bool {
        if self.config.is_excepted(change.category) {
            tracing::trace!(
                category = %change.category,
                description = %change.description,
                "change suppressed"
            );
            return false;
        }
        result.push_change(change, reason);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(version: &str, paths: Value) -> Value {
        json!({"openapi": "3.1.0", "info": {"version": version}, "paths": paths})
    }

    #[test]
    fn test_default_config() {
        let config = DiffConfig::default();
        assert!(config.ignore.is_empty());
        assert!(config.except_categories.is_empty());
        assert!(!config.dedupe_required_fields);
    }

    #[test]
    fn test_ignore_patterns() {
        let config = DiffConfig {
            ignore: vec!["/internal/**".to_string(), "/health".to_string()],
            ..DiffConfig::default()
        };
        assert!(config.is_ignored("/internal"));
        assert!(config.is_ignored("/internal/jobs/{id}"));
        assert!(!config.is_ignored("/internals"));
        assert!(config.is_ignored("/health"));
        assert!(!config.is_ignored("/health/live"));
    }

    #[test]
    fn test_empty_documents() {
        let result = DiffEngine::new().compare(&json!({}), &json!(null));
        assert_eq!(result.old_version, "unknown");
        assert_eq!(result.new_version, "unknown");
        assert!(result.is_empty());
        assert!(result.breaking.is_empty());
    }

    #[test]
    fn test_ordering_added_removed_modified() {
        let old = doc(
            "1",
            json!({
                "/b": {"get": {"responses": {"200": {}}}},
                "/z": {"get": {}}
            }),
        );
        let new = doc(
            "2",
            json!({
                "/b": {"get": {"responses": {}}, "post": {}},
                "/a": {"get": {}}
            }),
        );

        let result = DiffEngine::new().compare(&old, &new);
        let described: Vec<_> = result.changes.iter().map(|c| c.description.as_str()).collect();
        assert_eq!(
            described,
            vec![
                "New endpoint: get /a",
                "New endpoint: post /b",
                "Removed endpoint: get /z",
                "Response code 200 removed",
            ]
        );
        assert_eq!(result.breaking[0].reason, "Endpoint removed");
        assert_eq!(result.breaking[1].reason, "Response code 200 removed");
        assert_eq!(
            result.breaking[1].migration,
            "Update client to handle the removed response code"
        );
    }

    #[test]
    fn test_modified_counted_once_per_operation() {
        let old = doc(
            "1",
            json!({"/users": {"get": {"parameters": [{"name": "a"}, {"name": "b"}]}}}),
        );
        let new = doc("2", json!({"/users": {"get": {}}}));

        let result = DiffEngine::new().compare(&old, &new);
        assert_eq!(result.summary.modified_endpoints, 1);
        assert_eq!(result.summary.breaking_changes, 2);
        assert_eq!(result.breaking.len(), 2);
    }

    #[test]
    fn test_except_categories_keep_summary_consistent() {
        let old = doc(
            "1",
            json!({
                "/users": {"get": {"responses": {"404": {}}}},
                "/old": {"get": {}}
            }),
        );
        let new = doc("2", json!({"/users": {"get": {}}}));

        let config = DiffConfig {
            except_categories: vec!["response_code_removed".to_string()],
            ..DiffConfig::default()
        };
        let result = DiffEngine::with_config(config).compare(&old, &new);

        assert_eq!(result.summary.modified_endpoints, 0);
        assert_eq!(result.summary.removed_endpoints, 1);
        assert_eq!(result.summary.breaking_changes, 1);
        assert_eq!(result.breaking.len(), 1);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let yaml = "drift:\n  except_categories:\n    - type_changed\n";
        assert!(DiffConfig::from_yaml_str(yaml).is_err());
    }
}
