//! Per-operation checks
//!
//! Each check looks at one aspect of an operation present in both documents
//! and reports zero or more `Modified` changes. Checks run in a fixed order
//! and iterate sorted collections, so the output is reproducible.

use crate::compat::categories::ChangeCategory;
use crate::compat::types::{Change, ChangeKind};
use crate::document::{self, Object};

/// Identifies the operation under comparison
#[derive(Debug, Clone, Copy)]
pub struct OperationRef<'a> {
    pub path: &'a str,
    pub method: &'a str,
}

impl OperationRef<'_> {
    fn modified(&self, category: ChangeCategory, description: String) -> Change {
        Change::new(
            ChangeKind::Modified,
            category,
            self.path,
            self.method,
            description,
        )
    }
}

/// Options that alter individual checks
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    /// Report each newly required field once even when several media types list it
    pub dedupe_required_fields: bool,
}

/// Runs every check against one operation, in order.
pub fn compare_operations(
    op: OperationRef<'_>,
    old_op: &Object,
    new_op: &Object,
    options: CheckOptions,
) -> Vec<Change> {
    let mut changes = Vec::new();
    check_request_body(op, old_op, new_op, &mut changes);
    check_required_fields(op, old_op, new_op, options, &mut changes);
    check_response_codes(op, old_op, new_op, &mut changes);
    check_removed_parameters(op, old_op, new_op, &mut changes);
    check_required_parameters(op, old_op, new_op, &mut changes);
    changes
}

/// A body that disappears, or a required body that appears.
///
/// A newly added optional body is not reported.
pub fn check_request_body(
    op: OperationRef<'_>,
    old_op: &Object,
    new_op: &Object,
    changes: &mut Vec<Change>,
) {
    match (document::request_body(old_op), document::request_body(new_op)) {
        (Some(_), None) => changes.push(op.modified(
            ChangeCategory::RequestBodyRemoved,
            "Request body removed".to_string(),
        )),
        (None, Some(body)) if document::is_body_required(body) => changes.push(op.modified(
            ChangeCategory::RequestBodyRequired,
            "Required request body added".to_string(),
        )),
        _ => {}
    }
}

/// Fields required by the new body schema but not by the old one.
pub fn check_required_fields(
    op: OperationRef<'_>,
    old_op: &Object,
    new_op: &Object,
    options: CheckOptions,
    changes: &mut Vec<Change>,
) {
    let old_required = document::required_fields(old_op);
    let mut new_required = document::required_fields(new_op);

    if options.dedupe_required_fields {
        let mut seen = std::collections::HashSet::new();
        new_required.retain(|field| seen.insert(field.clone()));
    }

    for field in new_required {
        if !old_required.contains(&field) {
            changes.push(op.modified(
                ChangeCategory::RequiredFieldAdded,
                format!("New required field: {field}"),
            ));
        }
    }
}

/// Response codes documented before and no longer documented.
pub fn check_response_codes(
    op: OperationRef<'_>,
    old_op: &Object,
    new_op: &Object,
    changes: &mut Vec<Change>,
) {
    let new_codes = document::response_codes(new_op);

    for code in document::response_codes(old_op) {
        if !new_codes.contains(&code) {
            changes.push(op.modified(
                ChangeCategory::ResponseCodeRemoved,
                format!("Response code {code} removed"),
            ));
        }
    }
}

/// Parameters that no longer exist, matched by name.
pub fn check_removed_parameters(
    op: OperationRef<'_>,
    old_op: &Object,
    new_op: &Object,
    changes: &mut Vec<Change>,
) {
    let new_params = document::parameters(new_op);

    for name in document::parameters(old_op).keys() {
        if !new_params.contains_key(name) {
            changes.push(op.modified(
                ChangeCategory::ParameterRemoved,
                format!("Parameter '{name}' removed"),
            ));
        }
    }
}

/// New parameters that clients are obliged to send.
pub fn check_required_parameters(
    op: OperationRef<'_>,
    old_op: &Object,
    new_op: &Object,
    changes: &mut Vec<Change>,
) {
    let old_params = document::parameters(old_op);

    for (name, param) in document::parameters(new_op) {
        if !old_params.contains_key(&name) && document::is_parameter_required(param) {
            changes.push(op.modified(
                ChangeCategory::RequiredParameterAdded,
                format!("New required parameter: {name}"),
            ));
        }
    }
}
