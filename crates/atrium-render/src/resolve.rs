//! Reference resolution and type-ahead candidates
//!
//! Presenting a reference field needs the referenced record's label
//! field. Resolution is a lookup over data the caller already fetched,
//! keeping `present` pure; the engine pre-loads referenced rows and
//! hands the renderer a [`MapResolver`].

use atrium_types::{FieldName, ObjectName, Record, RecordId};
use std::collections::HashMap;

/// Resolves a foreign key to the referenced record's display label
pub trait ReferenceResolver {
    /// `None` when the referenced record cannot be resolved; the
    /// presenter then falls back to the raw key value.
    fn label(&self, object: &ObjectName, id: &RecordId, label_field: &FieldName) -> Option<String>;
}

/// Resolver over pre-fetched records
#[derive(Debug, Default)]
pub struct MapResolver {
    records: HashMap<(ObjectName, RecordId), Record>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: ObjectName, record: Record) {
        if let Some(id) = record.id() {
            self.records.insert((object, id.clone()), record);
        }
    }
}

impl ReferenceResolver for MapResolver {
    fn label(&self, object: &ObjectName, id: &RecordId, label_field: &FieldName) -> Option<String> {
        self.records
            .get(&(object.clone(), id.clone()))
            .and_then(|r| r.get(label_field))
            .map(|v| v.raw_display())
    }
}

/// One pickable option of a reference type-ahead
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCandidate {
    pub id: RecordId,
    pub label: String,
}

/// Client-side type-ahead filter over the referenced object's records:
/// case-insensitive substring match on the label field and, when
/// given, a secondary field. An empty query matches everything.
pub fn reference_candidates(
    records: &[Record],
    label_field: &FieldName,
    secondary: Option<&FieldName>,
    query: &str,
) -> Vec<ReferenceCandidate> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter_map(|record| {
            let id = record.id()?.clone();
            let label = record.get(label_field).map(|v| v.raw_display()).unwrap_or_default();
            let matches = needle.is_empty()
                || label.to_lowercase().contains(&needle)
                || secondary
                    .and_then(|f| record.get(f))
                    .map(|v| v.raw_display().to_lowercase().contains(&needle))
                    .unwrap_or(false);
            matches.then_some(ReferenceCandidate { id, label })
        })
        .collect()
}
