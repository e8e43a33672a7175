//! Scalar value union stored in records
//!
//! A closed union: every cell of every record is one of these
//! variants. `Null` is an explicit stored NULL; a key that is not
//! present in a record at all is *absent*, which is a different thing
//! and is represented by `Option::None` at the accessor layer.

use crate::ids::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored scalar value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
    Id(RecordId),
    Null,
}

/// Conversion failures between `Value` and interchange JSON
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("unsupported JSON shape for a scalar value: {0}")]
    UnsupportedJson(String),

    #[error("malformed timestamp string: {0}")]
    MalformedTimestamp(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Interchange form used by the store adapter.
    ///
    /// Timestamps serialize as RFC 3339 strings, ids as their UUID
    /// string form; everything else maps onto the native JSON scalar.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Integer(n) => serde_json::Value::from(*n),
            Value::Decimal(n) => {
                serde_json::Number::from_f64(*n).map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Timestamp(ts) => serde_json::Value::String(ts.to_rfc3339()),
            Value::Id(id) => serde_json::Value::String(id.to_string()),
            Value::Null => serde_json::Value::Null,
        }
    }

    /// Parse interchange JSON back into a scalar.
    ///
    /// Strings are tried as UUID, then RFC 3339 timestamp, then kept
    /// as text. Arrays and objects are not scalars and are rejected.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, ValueError> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Boolean(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Decimal(f))
                } else {
                    Err(ValueError::UnsupportedJson(n.to_string()))
                }
            }
            serde_json::Value::String(s) => {
                if let Some(id) = RecordId::parse(s) {
                    return Ok(Value::Id(id));
                }
                if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
                    return Ok(Value::Timestamp(ts.with_timezone(&Utc)));
                }
                Ok(Value::Text(s.clone()))
            }
            other => Err(ValueError::UnsupportedJson(other.to_string())),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            Value::Decimal(n) => Some(*n),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_id(&self) -> Option<&RecordId> {
        match self {
            Value::Id(id) => Some(id),
            _ => None,
        }
    }

    /// Raw display form used when no richer presentation applies,
    /// e.g. an unresolvable foreign key.
    pub fn raw_display(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Integer(n) => n.to_string(),
            Value::Decimal(n) => n.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Timestamp(ts) => ts.to_rfc3339(),
            Value::Id(id) => id.to_string(),
            Value::Null => String::new(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<RecordId> for Value {
    fn from(id: RecordId) -> Self {
        Value::Id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip_scalars() {
        for v in [
            Value::Text("hello".into()),
            Value::Integer(42),
            Value::Boolean(true),
            Value::Null,
            Value::Id(RecordId::generate()),
        ] {
            assert_eq!(Value::from_json(&v.to_json()).unwrap(), v);
        }
    }

    #[test]
    fn test_timestamp_json_roundtrip() {
        let ts = Value::Timestamp(Utc::now());
        let back = Value::from_json(&ts.to_json()).unwrap();
        // RFC 3339 keeps sub-second precision, so equality holds
        assert_eq!(back, ts);
    }

    #[test]
    fn test_non_scalar_json_rejected() {
        let arr = serde_json::json!([1, 2]);
        assert!(Value::from_json(&arr).is_err());
    }

    #[test]
    fn test_plain_string_stays_text() {
        let v = Value::from_json(&serde_json::json!("Acme GmbH")).unwrap();
        assert_eq!(v, Value::Text("Acme GmbH".into()));
    }
}
