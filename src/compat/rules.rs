//! Static breaking change rule table
//!
//! The table documents which kinds of change are considered breaking and how
//! severe they are. It is informational: the engine counts every change of a
//! breaking category in the summary, including `Warning` rules.

use serde::{Deserialize, Serialize};

/// Kinds of breaking change known to the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    EndpointRemoved,
    ParameterRemoved,
    RequiredFieldAdded,
    ResponseRemoved,
    TypeChanged,
    RequestBodyRemoved,
    SecurityAdded,
}

impl RuleKind {
    pub fn id(&self) -> &'static str {
        match self {
            RuleKind::EndpointRemoved => "endpoint_removed",
            RuleKind::ParameterRemoved => "parameter_removed",
            RuleKind::RequiredFieldAdded => "required_field_added",
            RuleKind::ResponseRemoved => "response_removed",
            RuleKind::TypeChanged => "type_changed",
            RuleKind::RequestBodyRemoved => "request_body_removed",
            RuleKind::SecurityAdded => "security_added",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Severity levels for breaking change rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Will break existing clients
    Error,
    /// May break clients depending on how they handle responses
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One entry of the rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    pub kind: RuleKind,
    pub description: &'static str,
    pub severity: Severity,
}

const DEFAULT_RULES: &[RuleDescriptor] = &[
    RuleDescriptor {
        kind: RuleKind::EndpointRemoved,
        description: "Removing an endpoint breaks existing clients",
        severity: Severity::Error,
    },
    RuleDescriptor {
        kind: RuleKind::ParameterRemoved,
        description: "Removing a parameter may break clients that send it",
        severity: Severity::Error,
    },
    RuleDescriptor {
        kind: RuleKind::RequiredFieldAdded,
        description: "Adding a required field breaks clients not sending it",
        severity: Severity::Error,
    },
    RuleDescriptor {
        kind: RuleKind::ResponseRemoved,
        description: "Removing a response code may break client error handling",
        severity: Severity::Warning,
    },
    RuleDescriptor {
        kind: RuleKind::TypeChanged,
        description: "Changing a field type breaks serialization",
        severity: Severity::Error,
    },
];

/// The documented rule descriptors
pub fn default_rules() -> &'static [RuleDescriptor] {
    DEFAULT_RULES
}

/// Looks up the descriptor for a rule kind, if the table documents it.
pub fn find_rule(kind: RuleKind) -> Option<&'static RuleDescriptor> {
    DEFAULT_RULES.iter().find(|rule| rule.kind == kind)
}

/// Every known rule kind is breaking, regardless of severity.
pub fn is_breaking(kind: RuleKind) -> bool {
    match kind {
        RuleKind::EndpointRemoved
        | RuleKind::ParameterRemoved
        | RuleKind::RequiredFieldAdded
        | RuleKind::ResponseRemoved
        | RuleKind::TypeChanged
        | RuleKind::RequestBodyRemoved
        | RuleKind::SecurityAdded => true,
    }
}

/// Verify rule table consistency (for testing)
pub fn verify_rules() -> Result<(), String> {
    let mut seen = std::collections::HashSet::new();
    for rule in DEFAULT_RULES {
        if !seen.insert(rule.kind) {
            return Err(format!("Duplicate rule kind: {}", rule.kind));
        }
        if !is_breaking(rule.kind) {
            return Err(format!("Documented rule is not breaking: {}", rule.kind));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::ChangeCategory;

    #[test]
    fn test_rule_table() {
        assert!(verify_rules().is_ok());
        assert_eq!(default_rules().len(), 5);

        let warnings: Vec<_> = default_rules()
            .iter()
            .filter(|r| r.severity == Severity::Warning)
            .map(|r| r.kind)
            .collect();
        assert_eq!(warnings, vec![RuleKind::ResponseRemoved]);
    }

    #[test]
    fn test_warning_rule_still_breaking() {
        let rule = find_rule(RuleKind::ResponseRemoved).unwrap();
        assert_eq!(rule.severity, Severity::Warning);
        assert!(is_breaking(rule.kind));
        assert_eq!(
            ChangeCategory::ResponseCodeRemoved.rule_kind(),
            Some(RuleKind::ResponseRemoved)
        );
    }

    #[test]
    fn test_undocumented_kinds() {
        assert!(find_rule(RuleKind::RequestBodyRemoved).is_none());
        assert!(find_rule(RuleKind::SecurityAdded).is_none());
        assert!(is_breaking(RuleKind::SecurityAdded));
    }
}
