//! File-loading failures of the file-based entry point

use openapi_drift::{LoadError, SpecRole, compare_files};
use std::fs;

#[test]
fn test_missing_old_file() {
    let err = compare_files("tests/data/does_not_exist.json", "tests/data/users_v2.json")
        .unwrap_err();

    assert!(matches!(err, LoadError::NotFound { .. }));
    assert_eq!(err.role(), SpecRole::Old);
    assert!(err.to_string().contains("does_not_exist.json"));
    assert!(err.to_string().starts_with("old spec"));
}

#[test]
fn test_invalid_new_file() {
    let err = compare_files("tests/data/users_v1.json", "tests/data/truncated.json").unwrap_err();

    assert!(matches!(err, LoadError::InvalidJson { .. }));
    assert_eq!(err.role(), SpecRole::New);
    assert!(err.is_parse_error());
    assert!(err.path().ends_with("truncated.json"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_invalid_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "paths:\n  /a: [unclosed\n").unwrap();

    let err = compare_files("tests/data/users_v1.json", &path).unwrap_err();
    assert!(matches!(err, LoadError::InvalidYaml { .. }));
    assert_eq!(err.role(), SpecRole::New);
}

#[test]
fn test_directory_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();

    let err = compare_files(dir.path(), "tests/data/users_v2.json").unwrap_err();
    assert_eq!(err.role(), SpecRole::Old);
    assert!(!err.is_parse_error());
}

#[test]
fn test_old_file_checked_before_new() {
    let err = compare_files("tests/data/missing_a.json", "tests/data/missing_b.json").unwrap_err();
    assert_eq!(err.role(), SpecRole::Old);
}
