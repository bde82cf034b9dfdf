//! Tolerant accessors over a decoded OpenAPI document.
//!
//! The document is kept as a generic `serde_json::Value`. Every accessor
//! degrades to an empty or default value on a missing key or a type
//! mismatch, so partially valid documents still produce a best-effort diff.
//! All collections are returned in sorted order so that diffs are
//! reproducible.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A JSON object inside the document.
pub type Object = Map<String, Value>;

/// Operations of one path, keyed by method as written in the document.
pub type PathOperations<'a> = BTreeMap<String, &'a Object>;

/// Version used when `info.version` is missing or not a string.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Returns `info.version`, or `"unknown"`.
pub fn version(doc: &Value) -> String {
    doc.get("info")
        .and_then(|info| info.get("version"))
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_VERSION)
        .to_string()
}

/// Flattens the `paths` section into path -> method -> operation.
///
/// A path whose value is not an object still gets an (empty) entry; method
/// entries whose value is not an object are skipped.
pub fn paths(doc: &Value) -> BTreeMap<String, PathOperations<'_>> {
    let mut result = BTreeMap::new();

    let Some(paths) = doc.get("paths").and_then(Value::as_object) else {
        return result;
    };

    for (path, item) in paths {
        let operations: PathOperations<'_> = item
            .as_object()
            .map(|methods| {
                methods
                    .iter()
                    .filter_map(|(method, op)| op.as_object().map(|op| (method.clone(), op)))
                    .collect()
            })
            .unwrap_or_default();
        result.insert(path.clone(), operations);
    }

    result
}

/// The operation's `requestBody`, when it is an object.
pub fn request_body(op: &Object) -> Option<&Object> {
    op.get("requestBody").and_then(Value::as_object)
}

/// Whether a request body declares `required: true`.
pub fn is_body_required(body: &Object) -> bool {
    body.get("required").and_then(Value::as_bool).unwrap_or(false)
}

/// Required property names of the request body schema.
///
/// Lists from every media type are concatenated, media types taken in sorted
/// order. Names repeated across media types appear once per media type.
pub fn required_fields(op: &Object) -> Vec<String> {
    let Some(content) = request_body(op)
        .and_then(|body| body.get("content"))
        .and_then(Value::as_object)
    else {
        return Vec::new();
    };

    let mut media_types: Vec<(&String, &Value)> = content.iter().collect();
    media_types.sort_by(|a, b| a.0.cmp(b.0));

    media_types
        .into_iter()
        .filter_map(|(_, media)| {
            media
                .get("schema")
                .and_then(|schema| schema.get("required"))
                .and_then(Value::as_array)
        })
        .flatten()
        .filter_map(|name| name.as_str().map(str::to_string))
        .collect()
}

/// Status codes declared under `responses`, sorted.
pub fn response_codes(op: &Object) -> Vec<String> {
    let mut codes: Vec<String> = op
        .get("responses")
        .and_then(Value::as_object)
        .map(|responses| responses.keys().cloned().collect())
        .unwrap_or_default();
    codes.sort();
    codes
}

/// Parameters keyed by name. Entries without a string `name` are skipped.
pub fn parameters(op: &Object) -> BTreeMap<String, &Object> {
    let mut result = BTreeMap::new();

    if let Some(params) = op.get("parameters").and_then(Value::as_array) {
        for param in params.iter().filter_map(Value::as_object) {
            if let Some(name) = param.get("name").and_then(Value::as_str) {
                result.insert(name.to_string(), param);
            }
        }
    }

    result
}

/// The parameter's `required` flag, false unless it is literally `true`.
pub fn is_parameter_required(param: &Object) -> bool {
    param.get("required").and_then(Value::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Object {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_version_defaults_to_unknown() {
        assert_eq!(version(&json!({"info": {"version": "2.1.0"}})), "2.1.0");
        assert_eq!(version(&json!({"info": {"version": 2}})), "unknown");
        assert_eq!(version(&json!({"info": "nope"})), "unknown");
        assert_eq!(version(&json!([])), "unknown");
    }

    #[test]
    fn test_paths_skips_non_object_operations() {
        let doc = json!({
            "paths": {
                "/users": {
                    "get": {"summary": "List"},
                    "parameters": [{"name": "x"}],
                    "summary": "text"
                },
                "/broken": "not an object"
            }
        });

        let paths = paths(&doc);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths["/users"].keys().collect::<Vec<_>>(), vec!["get"]);
        assert!(paths["/broken"].is_empty());
    }

    #[test]
    fn test_paths_missing_section() {
        assert!(paths(&json!({"openapi": "3.1.0"})).is_empty());
        assert!(paths(&json!({"paths": []})).is_empty());
    }

    #[test]
    fn test_required_fields_concatenates_media_types() {
        let op = object(json!({
            "requestBody": {
                "content": {
                    "application/xml": {"schema": {"required": ["id", "name"]}},
                    "application/json": {"schema": {"required": ["name", 7, "email"]}}
                }
            }
        }));

        // json sorts before xml; duplicates across media types are kept
        assert_eq!(required_fields(&op), vec!["name", "email", "id", "name"]);
    }

    #[test]
    fn test_required_fields_tolerates_missing_pieces() {
        assert!(required_fields(&object(json!({}))).is_empty());
        assert!(required_fields(&object(json!({"requestBody": {"content": 1}}))).is_empty());
        let op = object(json!({"requestBody": {"content": {"text/plain": {"schema": true}}}}));
        assert!(required_fields(&op).is_empty());
    }

    #[test]
    fn test_response_codes_sorted() {
        let op = object(json!({"responses": {"404": {}, "200": {}, "default": {}}}));
        assert_eq!(response_codes(&op), vec!["200", "404", "default"]);
        assert!(response_codes(&object(json!({"responses": []}))).is_empty());
    }

    #[test]
    fn test_parameters_require_string_name() {
        let op = object(json!({
            "parameters": [
                {"name": "limit", "in": "query"},
                {"name": 3},
                "garbage",
                {"in": "header"},
                {"name": "id", "in": "path", "required": true}
            ]
        }));

        let params = parameters(&op);
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["id", "limit"]);
        assert!(is_parameter_required(params["id"]));
        assert!(!is_parameter_required(params["limit"]));
    }

    #[test]
    fn test_required_flag_must_be_boolean() {
        assert!(!is_parameter_required(&object(json!({"required": "true"}))));
        assert!(!is_body_required(&object(json!({"required": 1}))));
        assert!(is_body_required(&object(json!({"required": true}))));
    }
}
