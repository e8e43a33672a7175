//! Identifier newtypes shared across the engine
//!
//! Object and field names are metadata keys, not free-form strings;
//! record ids are store-assigned UUIDs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of an object type (e.g. `clients`, `channel_partners`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectName(String);

impl ObjectName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ObjectName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// API name of a field within an object type (e.g. `referred_by`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldName(String);

impl FieldName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Humanize a physical column name for display when no descriptor
    /// exists: underscores become spaces, first letter capitalized.
    pub fn humanize(&self) -> String {
        let spaced = self.0.replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => spaced,
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FieldName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Stable identifier of a record row
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse a stored string form. Returns `None` for malformed input
    /// rather than erroring; callers treat that as an unresolvable key.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_column_name() {
        assert_eq!(FieldName::new("referred_by").humanize(), "Referred by");
        assert_eq!(FieldName::new("name").humanize(), "Name");
        assert_eq!(FieldName::new("iso_standard").humanize(), "Iso standard");
    }

    #[test]
    fn test_record_id_parse_roundtrip() {
        let id = RecordId::generate();
        assert_eq!(RecordId::parse(&id.to_string()), Some(id));
        assert_eq!(RecordId::parse("not-a-uuid"), None);
    }
}
