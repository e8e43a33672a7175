//! Generic record rows
//!
//! A Record is an opaque, ordered map of api name to scalar value.
//! Access fails closed: a missing key is `None`, never a silent
//! default. The map is ordered so staged copies and store rows keep a
//! stable field order for diff-free comparisons in tests.

use crate::ids::{FieldName, RecordId};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of an object type
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    fields: BTreeMap<FieldName, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record carrying a freshly generated id.
    pub fn with_generated_id() -> Self {
        let mut record = Self::new();
        record.set(FieldName::new("id"), Value::Id(RecordId::generate()));
        record
    }

    /// Fail-closed read: absent key is `None`, stored NULL is
    /// `Some(&Value::Null)`. Callers must not conflate the two.
    pub fn get(&self, field: &FieldName) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: FieldName, value: Value) {
        self.fields.insert(field, value);
    }

    pub fn remove(&mut self, field: &FieldName) -> Option<Value> {
        self.fields.remove(field)
    }

    pub fn contains(&self, field: &FieldName) -> bool {
        self.fields.contains_key(field)
    }

    /// The conventional stable identifier field.
    pub fn id(&self) -> Option<&RecordId> {
        self.get(&FieldName::new("id")).and_then(Value::as_id)
    }

    pub fn text(&self, field: &FieldName) -> Option<&str> {
        self.get(field).and_then(Value::as_text)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&FieldName, &Value)> {
        self.fields.iter()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &FieldName> {
        self.fields.keys()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Independent copy for optimistic local editing.
    pub fn snapshot(&self) -> Record {
        self.clone()
    }

    /// Copy of this record keeping only the named columns. Used when
    /// inserting against a schema snapshot: columns the physical
    /// schema lacks are silently omitted rather than erroring.
    pub fn retain_columns(&self, columns: &[FieldName]) -> Record {
        let fields = self
            .fields
            .iter()
            .filter(|(name, _)| columns.contains(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Record { fields }
    }

    /// Interchange form for the store adapter.
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl FromIterator<(FieldName, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (FieldName, Value)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}
