//! Record store adapter trait
//!
//! The engine's only view of persistence. The generic RPC surface of
//! the real backend is expressed here as the two named procedures the
//! engine actually depends on: `columns` (physical column listing)
//! and `regenerate_descriptors` (descriptor bootstrap).

use crate::error::StoreResult;
use crate::filter::{Filter, OrderBy};
use async_trait::async_trait;
use atrium_types::{FieldDescriptor, FieldName, ObjectName, Record, RecordId};
use serde::{Deserialize, Serialize};

/// One physical column of an object type's schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: FieldName,

    /// Backend type name (e.g. `text`, `timestamp`, `uuid`)
    pub physical_type: String,

    /// Default expression applied by the backend, if any
    pub default: Option<serde_json::Value>,
}

impl ColumnDef {
    pub fn new(name: impl Into<FieldName>, physical_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            physical_type: physical_type.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Generic create/read/update/delete plus schema reflection against
/// the relational backing store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Select rows of an object type, optionally filtered and ordered
    async fn select(
        &self,
        object: &ObjectName,
        filter: Option<&Filter>,
        order: Option<&OrderBy>,
    ) -> StoreResult<Vec<Record>>;

    /// Fetch one row by id. `Ok(None)` when the row does not exist.
    async fn get(&self, object: &ObjectName, id: &RecordId) -> StoreResult<Option<Record>>;

    /// Insert a row, returning the stored row (server-computed fields
    /// included). Columns absent from the physical schema are dropped,
    /// not errored.
    async fn insert(&self, object: &ObjectName, row: Record) -> StoreResult<Record>;

    /// Overwrite fields of an existing row with the given patch,
    /// returning the stored row. Last write wins; no version check.
    async fn update(
        &self,
        object: &ObjectName,
        id: &RecordId,
        patch: Record,
    ) -> StoreResult<Record>;

    /// Delete a row by id
    async fn delete(&self, object: &ObjectName, id: &RecordId) -> StoreResult<()>;

    /// Additively add a column to the object type's physical schema.
    /// Must be idempotent: adding an existing column is a no-op.
    async fn alter_schema(&self, object: &ObjectName, column: ColumnDef) -> StoreResult<()>;

    /// The physical column list of an object type
    async fn columns(&self, object: &ObjectName) -> StoreResult<Vec<ColumnDef>>;

    /// The authored field descriptors of an object type. Empty when
    /// none have been authored; that is not an error.
    async fn descriptors(&self, object: &ObjectName) -> StoreResult<Vec<FieldDescriptor>>;

    /// Bootstrap descriptors from the physical schema when none exist,
    /// then return the current set. Idempotent; calling it against an
    /// already-described object changes nothing.
    async fn regenerate_descriptors(
        &self,
        object: &ObjectName,
    ) -> StoreResult<Vec<FieldDescriptor>>;
}
