//! Static option and validation-rule catalogs
//!
//! Two business fields (`status`, `iso_standard`) render as closed
//! selects sourced from these catalogs instead of free text. The
//! canonical status strings here are the single source both the
//! renderer and the workflow state machine read.
//!
//! Validation rules are a catalog only; nothing in this engine
//! evaluates them.

use crate::ids::FieldName;
use serde::{Deserialize, Serialize};

/// Canonical status values of the client pipeline, in chain order.
/// The two closing values are terminal.
pub const STATUS_VALUES: [&str; 7] = [
    "form_sent",
    "form_received",
    "draft_reviewed",
    "draft_approved",
    "certificate_sent",
    "closed_won",
    "closed_lost",
];

/// ISO standards the business certifies against.
pub const ISO_STANDARD_VALUES: [&str; 5] = [
    "ISO 9001",
    "ISO 14001",
    "ISO 27001",
    "ISO 45001",
    "ISO 13485",
];

/// One entry of a closed select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stored value
    pub value: String,
    /// Display label
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Lookup of closed-select option lists by field api name
#[derive(Debug, Clone, Default)]
pub struct OptionCatalog;

impl OptionCatalog {
    /// Options for a field, or `None` when the field is free text.
    pub fn options_for(field: &FieldName) -> Option<Vec<SelectOption>> {
        match field.as_str() {
            "status" => Some(
                STATUS_VALUES
                    .iter()
                    .map(|v| SelectOption::new(*v, humanize_status(v)))
                    .collect(),
            ),
            "iso_standard" => Some(
                ISO_STANDARD_VALUES
                    .iter()
                    .map(|v| SelectOption::new(*v, *v))
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn is_closed_select(field: &FieldName) -> bool {
        matches!(field.as_str(), "status" | "iso_standard")
    }
}

fn humanize_status(value: &str) -> String {
    FieldName::new(value).humanize()
}

/// Kinds of validation rules the catalog can describe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRuleKind {
    Required,
    UniqueWithinObject,
    MaxLength { max: usize },
    Pattern { regex: String },
}

/// A catalog entry describing a validation rule. Definitions only;
/// no evaluation engine exists in this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    pub field: FieldName,
    pub kind: ValidationRuleKind,
    pub message: String,
}
