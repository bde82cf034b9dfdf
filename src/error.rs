//! Errors raised while loading specification documents from disk.
//!
//! Comparison itself never fails: malformed documents degrade to empty
//! values. Only reading and decoding the input files can go wrong.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Which side of a comparison a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecRole {
    /// The baseline document.
    Old,
    /// The candidate document.
    New,
}

impl fmt::Display for SpecRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecRole::Old => write!(f, "old"),
            SpecRole::New => write!(f, "new"),
        }
    }
}

/// Failure to turn a file on disk into a specification document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{role} spec '{}' not found", path.display())]
    NotFound {
        role: SpecRole,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{role} spec '{}' unreadable", path.display())]
    Unreadable {
        role: SpecRole,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{role} spec '{}' is not valid JSON", path.display())]
    InvalidJson {
        role: SpecRole,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{role} spec '{}' is not valid YAML", path.display())]
    InvalidYaml {
        role: SpecRole,
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl LoadError {
    /// Builds the right variant for an I/O failure, separating missing files
    /// from other read errors.
    pub fn from_io(role: SpecRole, path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound { role, path, source }
        } else {
            LoadError::Unreadable { role, path, source }
        }
    }

    /// The side of the comparison whose file failed.
    pub fn role(&self) -> SpecRole {
        match self {
            LoadError::NotFound { role, .. }
            | LoadError::Unreadable { role, .. }
            | LoadError::InvalidJson { role, .. }
            | LoadError::InvalidYaml { role, .. } => *role,
        }
    }

    /// The offending file.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound { path, .. }
            | LoadError::Unreadable { path, .. }
            | LoadError::InvalidJson { path, .. }
            | LoadError::InvalidYaml { path, .. } => path,
        }
    }

    /// True when the file exists but could not be decoded.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            LoadError::InvalidJson { .. } | LoadError::InvalidYaml { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_separated_from_other_io_errors() {
        let missing = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = LoadError::from_io(SpecRole::Old, PathBuf::from("a.json"), missing);
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert_eq!(err.to_string(), "old spec 'a.json' not found");

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let err = LoadError::from_io(SpecRole::New, PathBuf::from("b.json"), denied);
        assert!(matches!(err, LoadError::Unreadable { .. }));
        assert_eq!(err.role(), SpecRole::New);
        assert!(!err.is_parse_error());
    }
}
