use openapi_drift::report::{ChangelogEntry, MigrationGuide, NO_MIGRATION_REQUIRED};
use openapi_drift::{compare, compare_files, generate_changelog, generate_migration_guide};
use serde_json::json;

#[test]
fn test_changelog_for_users_scenario() {
    let diff = compare_files("tests/data/users_v1.json", "tests/data/users_v2.json").unwrap();
    let markdown = generate_changelog(&diff);

    assert!(markdown.starts_with("## [2.0.0] - "));
    let breaking = markdown.find("Breaking Changes").unwrap();
    let added = markdown.find("### Added").unwrap();
    let changed = markdown.find("### Changed").unwrap();
    let removed = markdown.find("### Removed").unwrap();
    assert!(breaking < added && added < changed && changed < removed);

    assert!(markdown.contains("- New endpoint: get /products\n"));
    assert!(markdown.contains("- Removed endpoint: delete /users/{id}\n"));
    assert!(markdown.contains("- New required field: email\n"));
}

#[test]
fn test_changelog_today() {
    let diff = compare(&json!({}), &json!({}));
    let today = time::OffsetDateTime::now_utc().date();
    let entry = ChangelogEntry::from_diff(&diff, today);
    assert_eq!(entry.version, "unknown");
    assert_eq!(generate_changelog(&diff), entry.to_markdown());
}

#[test]
fn test_migration_guide_has_one_step_per_breaking_change() {
    let diff = compare_files("tests/data/users_v1.json", "tests/data/users_v2.json").unwrap();
    let guide = MigrationGuide::from_diff(&diff);
    assert_eq!(guide.steps.len(), diff.breaking.len());

    let markdown = generate_migration_guide(&diff);
    assert!(markdown.starts_with("# Migration Guide: 1.0.0 → 2.0.0\n"));
    assert!(markdown.contains("This guide covers 2 breaking change(s)"));
    assert!(markdown.contains("## 1. Handle removed endpoint: delete /users/{id}"));
    assert!(markdown.contains("## 2. Add required field for: post /users"));
    assert!(!markdown.contains("## 3."));
    assert!(!markdown.contains(NO_MIGRATION_REQUIRED));
}

#[test]
fn test_migration_guide_without_breaking_changes() {
    let old = json!({"info": {"version": "1.0.0"}, "paths": {"/a": {"get": {}}}});
    let new = json!({
        "info": {"version": "1.1.0"},
        "paths": {"/a": {"get": {}}, "/b": {"get": {}}}
    });

    let diff = compare(&old, &new);
    let markdown = generate_migration_guide(&diff);

    assert!(markdown.contains(NO_MIGRATION_REQUIRED));
    assert!(!markdown.contains("## 1."));
}

#[test]
fn test_parameter_changes_use_removal_and_required_templates() {
    let old = json!({"paths": {"/a": {"get": {"parameters": [{"name": "limit", "in": "query"}]}}}});
    let new = json!({
        "paths": {"/a": {"get": {
            "parameters": [{"name": "tenant", "in": "header", "required": true}]
        }}}
    });

    let diff = compare(&old, &new);
    let guide = MigrationGuide::from_diff(&diff);

    let titles: Vec<_> = guide.steps.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Handle removed endpoint: get /a", "Add required field for: get /a"]
    );
    assert_eq!(guide.steps[0].description, diff.breaking[0].migration);
    assert_eq!(diff.breaking[1].reason, "New required parameter: tenant");
}
