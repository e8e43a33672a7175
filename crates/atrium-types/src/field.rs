//! Field descriptors - per-column presentation metadata
//!
//! A FieldDescriptor is one row of metadata per (object type, field).
//! Descriptors are authored out-of-band and read-mostly here; the
//! engine only reflects them.

use crate::ids::{FieldName, ObjectName};
use serde::{Deserialize, Serialize};

/// Closed union of field types the engine understands.
///
/// Physical column types outside this set deliberately collapse to
/// `Text` via [`FieldType::from_physical`]; there is no implicit
/// fallthrough anywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number {
        kind: NumberKind,
    },
    Boolean,
    Date {
        kind: DateKind,
    },
    /// Foreign key to another object type, displayed via a configured
    /// label field on the referenced object.
    Reference {
        object: ObjectName,
        label_field: FieldName,
    },
}

impl FieldType {
    /// Map a physical column type name onto the closed union.
    /// Unknown names fall back to `Text` explicitly.
    pub fn from_physical(type_name: &str) -> Self {
        match type_name.to_ascii_lowercase().as_str() {
            "int" | "integer" | "bigint" | "smallint" => FieldType::Number {
                kind: NumberKind::Integer,
            },
            "decimal" | "numeric" | "real" | "double" | "float" | "money" => FieldType::Number {
                kind: NumberKind::Decimal,
            },
            "bool" | "boolean" => FieldType::Boolean,
            "date" => FieldType::Date {
                kind: DateKind::Date,
            },
            "timestamp" | "timestamptz" | "datetime" => FieldType::Date {
                kind: DateKind::Timestamp,
            },
            _ => FieldType::Text,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, FieldType::Reference { .. })
    }
}

/// Integer vs decimal numeric fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberKind {
    Integer,
    Decimal,
}

/// Calendar date vs full timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateKind {
    Date,
    Timestamp,
}

/// Layout span of a field within its section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldWidth {
    Half,
    Full,
}

/// Presentation metadata for one field of an object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Object type this descriptor belongs to
    pub object: ObjectName,

    /// API name, unique within the object type
    pub api_name: FieldName,

    /// Human-facing label
    pub label: String,

    /// Field type driving render dispatch
    pub field_type: FieldType,

    /// Whether a value must be supplied on create
    pub required: bool,

    /// Whether the backing column accepts NULL
    pub nullable: bool,

    /// Default value as stored-form JSON, if any
    pub default: Option<serde_json::Value>,

    /// Ascending sort key within the field's section. Total-orders
    /// fields inside a section; not unique across sections.
    pub display_order: i32,

    /// Free-form grouping key
    pub section: String,

    /// Half or full row span
    pub width: FieldWidth,

    /// Hidden descriptors are omitted from non-admin reads
    pub visible: bool,

    /// Created/updated audit columns
    pub system: bool,
}

impl FieldDescriptor {
    /// Minimal descriptor for a raw physical column with no authored
    /// metadata: humanized label, text type, visible, appended order.
    pub fn fallback(object: ObjectName, column: FieldName, display_order: i32) -> Self {
        let label = column.humanize();
        Self {
            object,
            api_name: column,
            label,
            field_type: FieldType::Text,
            required: false,
            nullable: true,
            default: None,
            display_order,
            section: "Details".to_string(),
            width: FieldWidth::Half,
            visible: true,
            system: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_physical_type_falls_back_to_text() {
        assert_eq!(FieldType::from_physical("jsonb"), FieldType::Text);
        assert_eq!(FieldType::from_physical("tsvector"), FieldType::Text);
    }

    #[test]
    fn test_physical_type_mapping() {
        assert_eq!(
            FieldType::from_physical("BIGINT"),
            FieldType::Number {
                kind: NumberKind::Integer
            }
        );
        assert_eq!(
            FieldType::from_physical("timestamptz"),
            FieldType::Date {
                kind: DateKind::Timestamp
            }
        );
        assert_eq!(FieldType::from_physical("boolean"), FieldType::Boolean);
    }

    #[test]
    fn test_field_type_serde_roundtrip() {
        let number = FieldType::Number {
            kind: NumberKind::Integer,
        };
        let json = serde_json::to_value(&number).unwrap();
        assert_eq!(json["type"], "number");
        assert_eq!(json["kind"], "integer");
        assert_eq!(serde_json::from_value::<FieldType>(json).unwrap(), number);

        let reference = FieldType::Reference {
            object: "channel_partners".into(),
            label_field: "name".into(),
        };
        let json = serde_json::to_value(&reference).unwrap();
        assert_eq!(serde_json::from_value::<FieldType>(json).unwrap(), reference);
    }

    #[test]
    fn test_fallback_descriptor_label() {
        let d = FieldDescriptor::fallback("clients".into(), "referred_by".into(), 3);
        assert_eq!(d.label, "Referred by");
        assert!(d.visible);
        assert_eq!(d.field_type, FieldType::Text);
    }
}
