//! Provides the high-level Spec API for comparing OpenAPI documents.

use crate::compat::{DiffConfig, DiffEngine, DiffResult};
use crate::error::{LoadError, SpecRole};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Coarse verdict of comparing two specifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compatibility {
    /// The documents are identical once decoded, or no change survived the configuration.
    Green,
    /// The documents differ but nothing breaks existing clients (e.g., an endpoint was added).
    Yellow,
    /// At least one breaking change was found.
    Red,
}

/// A decoded specification document with its fingerprint.
#[derive(Debug, Clone)]
pub struct Spec {
    /// The decoded document.
    pub document: Value,
    /// The semantic fingerprint, see [`fingerprint`].
    pub fingerprint: String,
}

impl Spec {
    /// Wraps an already decoded document.
    pub fn new(document: Value) -> Self {
        let fingerprint = fingerprint(&document);
        Spec {
            document,
            fingerprint,
        }
    }

    /// Decodes a document from text. JSON is tried first, then YAML.
    pub fn try_from(content: &str) -> anyhow::Result<Self> {
        let document = match serde_json::from_str::<Value>(content) {
            Ok(document) => document,
            Err(json_err) => serde_yaml::from_str::<Value>(content).map_err(|yaml_err| {
                anyhow::anyhow!(
                    "Document is neither valid JSON ({json_err}) nor valid YAML ({yaml_err})"
                )
            })?,
        };
        Ok(Self::new(document))
    }

    /// Reads and decodes a document from disk.
    ///
    /// Files ending in `.yaml` or `.yml` are decoded as YAML, everything else
    /// as JSON.
    pub fn from_file(path: impl AsRef<Path>, role: SpecRole) -> Result<Self, LoadError> {
        let path = path.as_ref();
        tracing::debug!(role = %role, path = %path.display(), "loading spec");

        let content = std::fs::read_to_string(path)
            .map_err(|source| LoadError::from_io(role, path.to_path_buf(), source))?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml")
            });

        let document = if is_yaml {
            serde_yaml::from_str(&content).map_err(|source| LoadError::InvalidYaml {
                role,
                path: path.to_path_buf(),
                source,
            })?
        } else {
            serde_json::from_str(&content).map_err(|source| LoadError::InvalidJson {
                role,
                path: path.to_path_buf(),
                source,
            })?
        };

        Ok(Self::new(document))
    }

    /// The document's `info.version`, or `"unknown"`.
    pub fn version(&self) -> String {
        crate::document::version(&self.document)
    }

    /// Compares this `Spec` (the "old" version) with another `Spec` (the "new" version).
    pub fn diff(&self, new_spec: &Spec) -> DiffResult {
        DiffEngine::new().compare(&self.document, &new_spec.document)
    }

    pub fn diff_with_config(&self, new_spec: &Spec, config: &DiffConfig) -> DiffResult {
        DiffEngine::with_config(config.clone()).compare(&self.document, &new_spec.document)
    }

    /// Determines the compatibility level between this (old) and the new spec.
    pub fn compare_with(&self, new_spec: &Spec) -> Compatibility {
        // Identical fingerprints mean identical documents.
        if self.fingerprint == new_spec.fingerprint {
            return Compatibility::Green;
        }
        self.verdict(new_spec, &self.diff(new_spec))
    }

    /// Compatibility level given a diff already computed against `new_spec`.
    pub fn verdict(&self, new_spec: &Spec, diff: &DiffResult) -> Compatibility {
        if self.fingerprint == new_spec.fingerprint || diff.is_empty() {
            Compatibility::Green
        } else if diff.has_breaking_changes() {
            Compatibility::Red
        } else {
            Compatibility::Yellow
        }
    }
}

/// SHA-256 of the document's compact JSON form, hex encoded.
///
/// `serde_json::Map` keeps keys sorted, so two documents that differ only in
/// key order or whitespace share a fingerprint.
pub fn fingerprint(document: &Value) -> String {
    let mut hasher = Sha256::new();
    // Serializing a Value cannot fail.
    hasher.update(serde_json::to_vec(document).unwrap_or_default());
    format!("{:x}", hasher.finalize())
}

/// Loads both files and compares them.
pub fn compare_files(
    old_path: impl AsRef<Path>,
    new_path: impl AsRef<Path>,
) -> Result<DiffResult, LoadError> {
    let old_spec = Spec::from_file(old_path, SpecRole::Old)?;
    let new_spec = Spec::from_file(new_path, SpecRole::New)?;
    Ok(old_spec.diff(&new_spec))
}
