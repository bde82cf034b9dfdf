//! Change categories and the migration hints attached to them

use crate::compat::rules::RuleKind;

/// What a single change is about.
///
/// Every `Change` is tagged with its category when it is created; hints,
/// changelog buckets and migration templates are chosen from this tag, never
/// from the free-text description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCategory {
    /// A path+method that only exists in the new document
    EndpointAdded,
    /// A path+method that only exists in the old document
    EndpointRemoved,
    /// The operation no longer accepts a request body
    RequestBodyRemoved,
    /// A required request body appeared where there was none
    RequestBodyRequired,
    /// The request body schema gained a required property
    RequiredFieldAdded,
    /// A documented response status code disappeared
    ResponseCodeRemoved,
    /// A parameter disappeared
    ParameterRemoved,
    /// A new parameter marked required appeared
    RequiredParameterAdded,
}

/// Hint used when nothing more specific is known about a change.
pub const GENERIC_MIGRATION_HINT: &str = "Review the change and update client code accordingly";

impl ChangeCategory {
    /// Stable identifier, used in configuration files and CLI flags
    pub fn id(&self) -> &'static str {
        match self {
            ChangeCategory::EndpointAdded => "endpoint_added",
            ChangeCategory::EndpointRemoved => "endpoint_removed",
            ChangeCategory::RequestBodyRemoved => "request_body_removed",
            ChangeCategory::RequestBodyRequired => "request_body_required",
            ChangeCategory::RequiredFieldAdded => "required_field_added",
            ChangeCategory::ResponseCodeRemoved => "response_code_removed",
            ChangeCategory::ParameterRemoved => "parameter_removed",
            ChangeCategory::RequiredParameterAdded => "required_parameter_added",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().into_iter().find(|category| category.id() == id)
    }

    pub fn all() -> Vec<Self> {
        vec![
            ChangeCategory::EndpointAdded,
            ChangeCategory::EndpointRemoved,
            ChangeCategory::RequestBodyRemoved,
            ChangeCategory::RequestBodyRequired,
            ChangeCategory::RequiredFieldAdded,
            ChangeCategory::ResponseCodeRemoved,
            ChangeCategory::ParameterRemoved,
            ChangeCategory::RequiredParameterAdded,
        ]
    }

    /// Additions are never breaking; everything else is.
    pub fn is_breaking(&self) -> bool {
        !matches!(self, ChangeCategory::EndpointAdded)
    }

    /// The rule a breaking category falls under.
    pub fn rule_kind(&self) -> Option<RuleKind> {
        match self {
            ChangeCategory::EndpointAdded => None,
            ChangeCategory::EndpointRemoved => Some(RuleKind::EndpointRemoved),
            ChangeCategory::RequestBodyRemoved => Some(RuleKind::RequestBodyRemoved),
            ChangeCategory::RequestBodyRequired
            | ChangeCategory::RequiredFieldAdded
            | ChangeCategory::RequiredParameterAdded => Some(RuleKind::RequiredFieldAdded),
            ChangeCategory::ResponseCodeRemoved => Some(RuleKind::ResponseRemoved),
            ChangeCategory::ParameterRemoved => Some(RuleKind::ParameterRemoved),
        }
    }

    /// Guidance for client authors affected by a change of this category
    pub fn migration_hint(&self) -> &'static str {
        match self {
            ChangeCategory::EndpointRemoved => {
                "Update client code to use alternative endpoint or remove usage"
            }
            ChangeCategory::RequestBodyRemoved => "Remove request body from client calls",
            ChangeCategory::RequestBodyRequired => "Add required request body to client calls",
            ChangeCategory::RequiredFieldAdded => "Add the new required field to request payload",
            ChangeCategory::ResponseCodeRemoved => {
                "Update client to handle the removed response code"
            }
            ChangeCategory::ParameterRemoved => {
                "Update client to remove usage of the deleted parameter"
            }
            ChangeCategory::RequiredParameterAdded => {
                "Add the new required parameter to client calls"
            }
            ChangeCategory::EndpointAdded => GENERIC_MIGRATION_HINT,
        }
    }
}

/// Picks a hint from a change description alone.
///
/// Only for callers that hold a description without its category, such as
/// text copied out of a rendered report.
pub fn migration_hint_for_description(description: &str) -> &'static str {
    let category = match description {
        "Request body removed" => Some(ChangeCategory::RequestBodyRemoved),
        "Required request body added" => Some(ChangeCategory::RequestBodyRequired),
        d if d.starts_with("New required field") => Some(ChangeCategory::RequiredFieldAdded),
        d if d.starts_with("Response code") => Some(ChangeCategory::ResponseCodeRemoved),
        d if d.starts_with("Parameter") => Some(ChangeCategory::ParameterRemoved),
        d if d.starts_with("New required parameter") => {
            Some(ChangeCategory::RequiredParameterAdded)
        }
        _ => None,
    };

    category.map_or(GENERIC_MIGRATION_HINT, |c| c.migration_hint())
}

impl std::fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for ChangeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| format!("Unknown change category: {s}"))
    }
}
