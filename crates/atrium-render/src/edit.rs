//! Edit controls and input parsing
//!
//! `edit` builds the editable representation of one field; the caller
//! renders it and, on change, feeds the raw input through
//! [`parse_input`] to get the new scalar value back. The renderer
//! never touches the record itself; merging the value into the staged
//! copy is the caller's job.

use crate::error::{RenderError, RenderResult};
use atrium_types::{
    FieldDescriptor, FieldName, FieldType, NumberKind, ObjectName, OptionCatalog, RecordId,
    SelectOption, Value,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Editable representation of one field
#[derive(Debug, Clone, PartialEq)]
pub enum EditControl {
    /// Free text input
    TextInput { value: String },

    /// Closed-option select (e.g. `status`, `iso_standard`)
    Select {
        options: Vec<SelectOption>,
        selected: Option<String>,
    },

    /// Numeric input; empty input commits as absent, never zero
    NumberInput { decimal: bool, value: Option<String> },

    /// Yes/no checkbox, no third state
    Checkbox { checked: bool },

    /// Plain calendar-date control, even for timestamp columns
    DateInput { value: Option<NaiveDate> },

    /// Type-ahead search-and-select over the referenced object type
    ReferencePicker {
        object: ObjectName,
        label_field: FieldName,
        selected: Option<RecordId>,
    },
}

/// Build the editable representation of one field.
///
/// Pure function of descriptor and current value.
pub fn edit(descriptor: &FieldDescriptor, value: Option<&Value>) -> EditControl {
    let value = value.filter(|v| !v.is_null());

    match &descriptor.field_type {
        FieldType::Boolean => EditControl::Checkbox {
            checked: value.and_then(Value::as_boolean).unwrap_or(false),
        },
        FieldType::Date { .. } => EditControl::DateInput {
            value: value.and_then(Value::as_timestamp).map(|ts| ts.date_naive()),
        },
        FieldType::Number { kind } => EditControl::NumberInput {
            decimal: *kind == NumberKind::Decimal,
            value: value.map(|v| v.raw_display()),
        },
        FieldType::Reference {
            object,
            label_field,
        } => EditControl::ReferencePicker {
            object: object.clone(),
            label_field: label_field.clone(),
            selected: value.and_then(Value::as_id).cloned(),
        },
        FieldType::Text => {
            if let Some(options) = OptionCatalog::options_for(&descriptor.api_name) {
                EditControl::Select {
                    options,
                    selected: value.map(|v| v.raw_display()),
                }
            } else {
                EditControl::TextInput {
                    value: value.map(|v| v.raw_display()).unwrap_or_default(),
                }
            }
        }
    }
}

/// Parse raw user input into the new scalar value for a field.
///
/// `prior` is the value currently staged for the field; date-only
/// edits use it to keep the stored time-of-day intact.
pub fn parse_input(
    descriptor: &FieldDescriptor,
    raw: &str,
    prior: Option<&Value>,
) -> RenderResult<Value> {
    let trimmed = raw.trim();

    match &descriptor.field_type {
        FieldType::Boolean => match trimmed {
            "true" | "yes" | "on" => Ok(Value::Boolean(true)),
            _ => Ok(Value::Boolean(false)),
        },
        FieldType::Number { kind } => {
            // Empty numeric input means absent, never zero
            if trimmed.is_empty() {
                return Ok(Value::Null);
            }
            match kind {
                NumberKind::Integer => trimmed
                    .parse::<i64>()
                    .map(Value::Integer)
                    .map_err(|_| RenderError::InvalidNumber(trimmed.to_string())),
                NumberKind::Decimal => trimmed
                    .parse::<f64>()
                    .map(Value::Decimal)
                    .map_err(|_| RenderError::InvalidNumber(trimmed.to_string())),
            }
        }
        FieldType::Date { .. } => {
            if trimmed.is_empty() {
                return Ok(Value::Null);
            }
            let picked = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map_err(|_| RenderError::InvalidDate(trimmed.to_string()))?;
            let prior_ts = prior.and_then(Value::as_timestamp);
            Ok(Value::Timestamp(merge_date_edit(prior_ts, picked)))
        }
        FieldType::Reference { .. } => {
            if trimmed.is_empty() {
                return Ok(Value::Null);
            }
            RecordId::parse(trimmed)
                .map(Value::Id)
                .ok_or_else(|| RenderError::InvalidReference(trimmed.to_string()))
        }
        FieldType::Text => {
            // Closed selects only accept cataloged values
            if let Some(options) = OptionCatalog::options_for(&descriptor.api_name) {
                if !trimmed.is_empty() && !options.iter().any(|o| o.value == trimmed) {
                    return Err(RenderError::UnknownOption {
                        field: descriptor.api_name.clone(),
                        value: trimmed.to_string(),
                    });
                }
            }
            if trimmed.is_empty() {
                Ok(Value::Null)
            } else {
                Ok(Value::Text(trimmed.to_string()))
            }
        }
    }
}

/// Merge a date-only edit onto a timestamp value.
///
/// Policy: the time-of-day of the pre-existing timestamp is preserved;
/// only the calendar date changes. With no prior value the time
/// component is midnight UTC. A date-only widget must not silently
/// corrupt a time component the user never saw.
pub fn merge_date_edit(prior: Option<DateTime<Utc>>, picked: NaiveDate) -> DateTime<Utc> {
    let time = prior
        .map(|ts| ts.time())
        .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default());
    DateTime::from_naive_utc_and_offset(picked.and_time(time), Utc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_types::{DateKind, FieldWidth};
    use chrono::{TimeZone, Timelike};

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

    #[test]
    fn test_status_edits_as_closed_select() {
        let d = descriptor("status", FieldType::Text);
        let control = edit(&d, Some(&Value::from("form_sent")));
        match control {
            EditControl::Select { options, selected } => {
                assert_eq!(selected.as_deref(), Some("form_sent"));
                assert!(options.iter().any(|o| o.value == "certificate_sent"));
            }
            other => panic!("expected select, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_text_edits_as_text_input() {
        let d = descriptor("name", FieldType::Text);
        assert_eq!(
            edit(&d, Some(&Value::from("Acme"))),
            EditControl::TextInput {
                value: "Acme".into()
            }
        );
    }

    #[test]
    fn test_empty_number_input_commits_absent_not_zero() {
        let d = descriptor(
            "employee_count",
            FieldType::Number {
                kind: NumberKind::Integer,
            },
        );
        assert_eq!(parse_input(&d, "  ", None).unwrap(), Value::Null);
        assert_eq!(parse_input(&d, "42", None).unwrap(), Value::Integer(42));
        assert!(parse_input(&d, "forty", None).is_err());
    }

    #[test]
    fn test_date_edit_preserves_prior_time_of_day() {
        let d = descriptor(
            "audit_date",
            FieldType::Date {
                kind: DateKind::Timestamp,
            },
        );
        let prior = Value::Timestamp(Utc.with_ymd_and_hms(2025, 3, 14, 16, 45, 30).unwrap());

        let merged = parse_input(&d, "2025-04-01", Some(&prior)).unwrap();
        let ts = merged.as_timestamp().unwrap();
        assert_eq!(ts.date_naive(), NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (16, 45, 30));
    }

    #[test]
    fn test_date_edit_without_prior_is_midnight() {
        let merged = merge_date_edit(None, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert_eq!((merged.hour(), merged.minute()), (0, 0));
    }

    #[test]
    fn test_unknown_select_value_rejected() {
        let d = descriptor("status", FieldType::Text);
        let err = parse_input(&d, "parked", None).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnknownOption {
                field: "status".into(),
                value: "parked".into()
            }
        );
    }

    #[test]
    fn test_reference_input_parses_id() {
        let d = descriptor(
            "referred_by",
            FieldType::Reference {
                object: "channel_partners".into(),
                label_field: "name".into(),
            },
        );
        let id = RecordId::generate();
        assert_eq!(parse_input(&d, &id.to_string(), None).unwrap(), Value::Id(id));
        assert!(parse_input(&d, "not-an-id", None).is_err());
        assert_eq!(parse_input(&d, "", None).unwrap(), Value::Null);
    }

    #[test]
    fn test_checkbox_from_missing_value_unchecked() {
        let d = descriptor("draft_uploaded", FieldType::Boolean);
        assert_eq!(edit(&d, None), EditControl::Checkbox { checked: false });
    }
}
