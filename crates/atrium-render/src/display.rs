//! Read-only presentation

use crate::resolve::ReferenceResolver;
use atrium_types::{FieldDescriptor, FieldType, OptionCatalog, Value};

/// Read-only representation of one field value
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    /// Plain text
    Text(String),

    /// Boolean shown as yes/no
    YesNo(bool),

    /// Calendar date; time-of-day, if stored, is not shown
    Date(String),

    /// Formatted numeric value
    Number(String),

    /// Resolved reference label plus the raw key for linking
    Reference { label: String, raw: String },

    /// Absent or NULL value
    Empty,
}

impl DisplayValue {
    /// Flat text form, e.g. for list cells.
    pub fn as_text(&self) -> String {
        match self {
            DisplayValue::Text(s) => s.clone(),
            DisplayValue::YesNo(b) => if *b { "Yes" } else { "No" }.to_string(),
            DisplayValue::Date(s) => s.clone(),
            DisplayValue::Number(s) => s.clone(),
            DisplayValue::Reference { label, .. } => label.clone(),
            DisplayValue::Empty => String::new(),
        }
    }
}

/// Produce the read-only representation of one field.
///
/// Pure function of its inputs: the descriptor drives dispatch, the
/// resolver supplies pre-fetched reference labels. Never fails; an
/// unresolvable reference degrades to the raw key and a value whose
/// variant does not match the descriptor degrades to its raw text.
pub fn present(
    descriptor: &FieldDescriptor,
    value: Option<&Value>,
    resolver: &dyn ReferenceResolver,
) -> DisplayValue {
    let Some(value) = value else {
        return DisplayValue::Empty;
    };
    if value.is_null() {
        return DisplayValue::Empty;
    }

    match &descriptor.field_type {
        FieldType::Boolean => match value.as_boolean() {
            Some(b) => DisplayValue::YesNo(b),
            None => DisplayValue::Text(value.raw_display()),
        },
        // Read views show the calendar date only, for both date and
        // timestamp kinds; a stored time component is suppressed, not
        // discarded.
        FieldType::Date { .. } => match value.as_timestamp() {
            Some(ts) => DisplayValue::Date(ts.date_naive().format("%b %-d, %Y").to_string()),
            None => DisplayValue::Text(value.raw_display()),
        },
        FieldType::Number { .. } => match value {
            Value::Integer(n) => DisplayValue::Number(n.to_string()),
            Value::Decimal(n) => DisplayValue::Number(format!("{n}")),
            other => DisplayValue::Text(other.raw_display()),
        },
        FieldType::Reference {
            object,
            label_field,
        } => {
            let raw = value.raw_display();
            match value.as_id() {
                Some(id) => match resolver.label(object, id, label_field) {
                    Some(label) => DisplayValue::Reference { label, raw },
                    None => DisplayValue::Reference {
                        label: raw.clone(),
                        raw,
                    },
                },
                // Not even an id; show what is stored
                None => DisplayValue::Reference {
                    label: raw.clone(),
                    raw,
                },
            }
        }
        FieldType::Text => {
            let raw = value.raw_display();
            // Closed-select fields display the option label, not the
            // stored value
            if let Some(options) = OptionCatalog::options_for(&descriptor.api_name) {
                if let Some(option) = options.iter().find(|o| o.value == raw) {
                    return DisplayValue::Text(option.label.clone());
                }
            }
            DisplayValue::Text(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::MapResolver;
    use atrium_types::{DateKind, FieldWidth, Record, RecordId};
    use chrono::{TimeZone, Utc};

    fn descriptor(name: &str, field_type: FieldType) -> FieldDescriptor {
        FieldDescriptor {
            object: "clients".into(),
            api_name: name.into(),
            label: name.into(),
            field_type,
            required: false,
            nullable: true,
            default: None,
            display_order: 0,
            section: "Details".into(),
            width: FieldWidth::Half,
            visible: true,
            system: false,
        }
    }

    fn reference_descriptor() -> FieldDescriptor {
        descriptor(
            "referred_by",
            FieldType::Reference {
                object: "channel_partners".into(),
                label_field: "name".into(),
            },
        )
    }

    #[test]
    fn test_absent_and_null_present_as_empty() {
        let d = descriptor("name", FieldType::Text);
        let resolver = MapResolver::new();
        assert_eq!(present(&d, None, &resolver), DisplayValue::Empty);
        assert_eq!(present(&d, Some(&Value::Null), &resolver), DisplayValue::Empty);
    }

    #[test]
    fn test_boolean_presents_as_yes_no() {
        let d = descriptor("draft_uploaded", FieldType::Boolean);
        let resolver = MapResolver::new();
        let shown = present(&d, Some(&Value::Boolean(true)), &resolver);
        assert_eq!(shown.as_text(), "Yes");
    }

    #[test]
    fn test_timestamp_presents_date_without_time() {
        let d = descriptor(
            "audit_date",
            FieldType::Date {
                kind: DateKind::Timestamp,
            },
        );
        let ts = Utc.with_ymd_and_hms(2025, 3, 14, 16, 45, 0).unwrap();
        let resolver = MapResolver::new();
        let shown = present(&d, Some(&Value::Timestamp(ts)), &resolver);
        assert_eq!(shown, DisplayValue::Date("Mar 14, 2025".into()));
    }

    #[test]
    fn test_resolved_reference_shows_label() {
        let mut partner = Record::with_generated_id();
        partner.set("name".into(), Value::from("Nordcert"));
        let id = partner.id().unwrap().clone();

        let mut resolver = MapResolver::new();
        resolver.add("channel_partners".into(), partner);

        let shown = present(&reference_descriptor(), Some(&Value::Id(id.clone())), &resolver);
        assert_eq!(
            shown,
            DisplayValue::Reference {
                label: "Nordcert".into(),
                raw: id.to_string()
            }
        );
    }

    #[test]
    fn test_dangling_reference_falls_back_to_raw_key() {
        // Partner deleted: the stored key must still present, not crash
        let gone = RecordId::generate();
        let resolver = MapResolver::new();
        let shown = present(&reference_descriptor(), Some(&Value::Id(gone.clone())), &resolver);
        assert_eq!(
            shown,
            DisplayValue::Reference {
                label: gone.to_string(),
                raw: gone.to_string()
            }
        );
    }

    #[test]
    fn test_status_presents_option_label() {
        let d = descriptor("status", FieldType::Text);
        let resolver = MapResolver::new();
        let shown = present(&d, Some(&Value::from("draft_reviewed")), &resolver);
        assert_eq!(shown, DisplayValue::Text("Draft reviewed".into()));
    }

    #[test]
    fn test_mismatched_variant_degrades_to_raw_text() {
        let d = descriptor("draft_uploaded", FieldType::Boolean);
        let resolver = MapResolver::new();
        let shown = present(&d, Some(&Value::from("maybe")), &resolver);
        assert_eq!(shown, DisplayValue::Text("maybe".into()));
    }
}
