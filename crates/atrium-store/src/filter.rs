//! Row filtering and ordering for `select`
//!
//! Deliberately small: equality, case-insensitive substring (the
//! type-ahead reference picker), and conjunction. Anything richer
//! belongs to the real backing store, not this seam.

use atrium_types::{FieldName, Record, Value};
use serde::{Deserialize, Serialize};

/// A row predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Filter {
    /// Field equals the given value exactly
    Equals { field: FieldName, value: Value },

    /// Field's text form contains the needle, case-insensitively
    ContainsCi { field: FieldName, needle: String },

    /// All sub-filters match
    And { filters: Vec<Filter> },
}

impl Filter {
    pub fn equals(field: impl Into<FieldName>, value: Value) -> Self {
        Filter::Equals {
            field: field.into(),
            value,
        }
    }

    pub fn contains_ci(field: impl Into<FieldName>, needle: impl Into<String>) -> Self {
        Filter::ContainsCi {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// Evaluate against a record. Absent fields never match.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::Equals { field, value } => record.get(field) == Some(value),
            Filter::ContainsCi { field, needle } => record
                .get(field)
                .map(|v| {
                    v.raw_display()
                        .to_lowercase()
                        .contains(&needle.to_lowercase())
                })
                .unwrap_or(false),
            Filter::And { filters } => filters.iter().all(|f| f.matches(record)),
        }
    }
}

/// Sort order for `select` results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: FieldName,
    pub ascending: bool,
}

impl OrderBy {
    pub fn asc(field: impl Into<FieldName>) -> Self {
        Self {
            field: field.into(),
            ascending: true,
        }
    }

    pub fn desc(field: impl Into<FieldName>) -> Self {
        Self {
            field: field.into(),
            ascending: false,
        }
    }

    /// Comparison key: rows are ordered by the text form of the field,
    /// with absent values sorted last regardless of direction.
    pub fn compare(&self, a: &Record, b: &Record) -> std::cmp::Ordering {
        let ka = a.get(&self.field).map(|v| v.raw_display());
        let kb = b.get(&self.field).map(|v| v.raw_display());
        match (ka, kb) {
            (Some(a), Some(b)) => {
                let ord = a.cmp(&b);
                if self.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            }
            // The direction flip never applies to absence
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> Record {
        let mut r = Record::new();
        r.set("name".into(), Value::from(name));
        r
    }

    #[test]
    fn test_contains_ci_matches_case_insensitively() {
        let f = Filter::contains_ci("name", "acme");
        assert!(f.matches(&record("ACME Holdings")));
        assert!(!f.matches(&record("Globex")));
    }

    #[test]
    fn test_absent_field_never_matches() {
        let f = Filter::contains_ci("email", "a");
        assert!(!f.matches(&record("Acme")));
    }

    #[test]
    fn test_absent_values_sort_last_in_both_directions() {
        let mut rows = vec![record("Acme"), Record::new(), record("Globex")];

        let asc = OrderBy::asc("name");
        rows.sort_by(|a, b| asc.compare(a, b));
        let names: Vec<_> = rows.iter().map(|r| r.text(&"name".into())).collect();
        assert_eq!(names, vec![Some("Acme"), Some("Globex"), None]);

        let desc = OrderBy::desc("name");
        rows.sort_by(|a, b| desc.compare(a, b));
        let names: Vec<_> = rows.iter().map(|r| r.text(&"name".into())).collect();
        assert_eq!(names, vec![Some("Globex"), Some("Acme"), None]);
    }

    #[test]
    fn test_and_requires_all() {
        let f = Filter::And {
            filters: vec![
                Filter::contains_ci("name", "acme"),
                Filter::equals("name", Value::from("Acme")),
            ],
        };
        assert!(f.matches(&record("Acme")));
        assert!(!f.matches(&record("Acme Holdings")));
    }
}
