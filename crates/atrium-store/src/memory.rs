//! In-memory record store
//!
//! Suitable for development and tests. The store keeps an honest
//! physical-schema map per object type: inserts drop columns the
//! schema does not have, `alter_schema` really widens, and unique
//! columns raise the same constraint-violation shape a real backend
//! would.

use crate::error::{StoreError, StoreResult};
use crate::filter::{Filter, OrderBy};
use crate::traits::{ColumnDef, RecordStore};
use async_trait::async_trait;
use atrium_types::{
    FieldDescriptor, FieldName, FieldType, FieldWidth, ObjectName, Record, RecordId, Value,
};
use dashmap::DashMap;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Table {
    columns: Vec<ColumnDef>,
    unique: Vec<FieldName>,
    descriptors: Vec<FieldDescriptor>,
    rows: BTreeMap<RecordId, Record>,
}

impl Table {
    fn column_names(&self) -> Vec<FieldName> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    fn has_column(&self, name: &FieldName) -> bool {
        self.columns.iter().any(|c| &c.name == name)
    }

    /// First unique-column conflict with any row other than `except`.
    fn unique_conflict(
        &self,
        object: &ObjectName,
        row: &Record,
        except: Option<&RecordId>,
    ) -> Option<StoreError> {
        for field in &self.unique {
            let Some(value) = row.get(field) else { continue };
            if value.is_null() {
                continue;
            }
            let taken = self
                .rows
                .iter()
                .filter(|(id, _)| Some(*id) != except)
                .any(|(_, existing)| existing.get(field) == Some(value));
            if taken {
                return Some(StoreError::ConstraintViolation {
                    constraint: format!("uq_{}_{}", object, field),
                    field: field.clone(),
                    value: value.raw_display(),
                });
            }
        }
        None
    }
}

/// In-memory reference implementation of [`RecordStore`]
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: DashMap<ObjectName, Table>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an object type with the given physical columns.
    /// Replaces any existing definition of the same name.
    pub fn create_object(&self, object: ObjectName, columns: Vec<ColumnDef>) {
        self.tables.insert(
            object,
            Table {
                columns,
                ..Table::default()
            },
        );
    }

    /// Mark a column unique, so inserts/updates can exercise the
    /// constraint-violation path.
    pub fn add_unique(&self, object: &ObjectName, field: FieldName) {
        if let Some(mut table) = self.tables.get_mut(object) {
            if !table.unique.contains(&field) {
                table.unique.push(field);
            }
        }
    }

    /// Author field descriptors for an object type, as the out-of-band
    /// object manager would.
    pub fn set_descriptors(&self, object: &ObjectName, descriptors: Vec<FieldDescriptor>) {
        if let Some(mut table) = self.tables.get_mut(object) {
            table.descriptors = descriptors;
        }
    }

    fn fallback_descriptor(object: &ObjectName, column: &ColumnDef, order: i32) -> FieldDescriptor {
        FieldDescriptor {
            object: object.clone(),
            api_name: column.name.clone(),
            label: column.name.humanize(),
            field_type: FieldType::from_physical(&column.physical_type),
            required: false,
            nullable: true,
            default: column.default.clone(),
            display_order: order,
            section: "Details".to_string(),
            width: FieldWidth::Half,
            visible: true,
            system: crate::audit::is_audit_column(&column.name),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn select(
        &self,
        object: &ObjectName,
        filter: Option<&Filter>,
        order: Option<&OrderBy>,
    ) -> StoreResult<Vec<Record>> {
        let table = self
            .tables
            .get(object)
            .ok_or_else(|| StoreError::ObjectNotFound(object.clone()))?;

        let mut rows: Vec<Record> = table
            .rows
            .values()
            .filter(|row| filter.map_or(true, |f| f.matches(row)))
            .cloned()
            .collect();

        if let Some(order) = order {
            rows.sort_by(|a, b| order.compare(a, b));
        }
        Ok(rows)
    }

    async fn get(&self, object: &ObjectName, id: &RecordId) -> StoreResult<Option<Record>> {
        let table = self
            .tables
            .get(object)
            .ok_or_else(|| StoreError::ObjectNotFound(object.clone()))?;
        Ok(table.rows.get(id).cloned())
    }

    async fn insert(&self, object: &ObjectName, row: Record) -> StoreResult<Record> {
        let mut table = self
            .tables
            .get_mut(object)
            .ok_or_else(|| StoreError::ObjectNotFound(object.clone()))?;

        // Only columns present in the current schema snapshot land
        let mut stored = row.retain_columns(&table.column_names());
        let id = match stored.id() {
            Some(id) => id.clone(),
            None => {
                let id = RecordId::generate();
                stored.set(FieldName::new("id"), Value::Id(id.clone()));
                id
            }
        };

        if let Some(err) = table.unique_conflict(object, &stored, None) {
            return Err(err);
        }

        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        object: &ObjectName,
        id: &RecordId,
        patch: Record,
    ) -> StoreResult<Record> {
        let mut table = self
            .tables
            .get_mut(object)
            .ok_or_else(|| StoreError::ObjectNotFound(object.clone()))?;

        let existing = table.rows.get(id).cloned().ok_or_else(|| StoreError::RecordNotFound {
            object: object.clone(),
            id: id.clone(),
        })?;

        let patch = patch.retain_columns(&table.column_names());
        let mut merged = existing;
        for (field, value) in patch.fields() {
            merged.set(field.clone(), value.clone());
        }

        if let Some(err) = table.unique_conflict(object, &merged, Some(id)) {
            return Err(err);
        }

        table.rows.insert(id.clone(), merged.clone());
        Ok(merged)
    }

    async fn delete(&self, object: &ObjectName, id: &RecordId) -> StoreResult<()> {
        let mut table = self
            .tables
            .get_mut(object)
            .ok_or_else(|| StoreError::ObjectNotFound(object.clone()))?;

        table.rows.remove(id).ok_or_else(|| StoreError::RecordNotFound {
            object: object.clone(),
            id: id.clone(),
        })?;
        Ok(())
    }

    async fn alter_schema(&self, object: &ObjectName, column: ColumnDef) -> StoreResult<()> {
        let mut table = self
            .tables
            .get_mut(object)
            .ok_or_else(|| StoreError::ObjectNotFound(object.clone()))?;

        // Additive and idempotent
        if !table.has_column(&column.name) {
            table.columns.push(column);
        }
        Ok(())
    }

    async fn columns(&self, object: &ObjectName) -> StoreResult<Vec<ColumnDef>> {
        let table = self
            .tables
            .get(object)
            .ok_or_else(|| StoreError::ObjectNotFound(object.clone()))?;
        Ok(table.columns.clone())
    }

    async fn descriptors(&self, object: &ObjectName) -> StoreResult<Vec<FieldDescriptor>> {
        let table = self
            .tables
            .get(object)
            .ok_or_else(|| StoreError::ObjectNotFound(object.clone()))?;
        Ok(table.descriptors.clone())
    }

    async fn regenerate_descriptors(
        &self,
        object: &ObjectName,
    ) -> StoreResult<Vec<FieldDescriptor>> {
        let mut table = self
            .tables
            .get_mut(object)
            .ok_or_else(|| StoreError::ObjectNotFound(object.clone()))?;

        if table.descriptors.is_empty() {
            table.descriptors = table
                .columns
                .iter()
                .enumerate()
                .map(|(i, column)| Self::fallback_descriptor(object, column, i as i32))
                .collect();
        }
        Ok(table.descriptors.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clients_store() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.create_object(
            "clients".into(),
            vec![
                ColumnDef::new("id", "uuid"),
                ColumnDef::new("name", "text"),
                ColumnDef::new("email", "text"),
            ],
        );
        store
    }

    fn named(name: &str) -> Record {
        let mut r = Record::new();
        r.set("name".into(), Value::from(name));
        r
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_drops_unknown_columns() {
        let store = clients_store();
        let mut row = named("Acme");
        row.set("draft_uploaded".into(), Value::Boolean(true));

        let stored = store.insert(&"clients".into(), row).await.unwrap();
        assert!(stored.id().is_some());
        assert!(!stored.contains(&"draft_uploaded".into()));
        assert_eq!(stored.text(&"name".into()), Some("Acme"));
    }

    #[tokio::test]
    async fn test_unique_violation_maps_to_constraint_error() {
        let store = clients_store();
        store.add_unique(&"clients".into(), "email".into());

        let mut a = named("Acme");
        a.set("email".into(), Value::from("ops@acme.test"));
        store.insert(&"clients".into(), a).await.unwrap();

        let mut b = named("Globex");
        b.set("email".into(), Value::from("ops@acme.test"));
        let err = store.insert(&"clients".into(), b).await.unwrap_err();

        match err {
            StoreError::ConstraintViolation { field, value, .. } => {
                assert_eq!(field, "email".into());
                assert_eq!(value, "ops@acme.test");
            }
            other => panic!("expected constraint violation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_is_last_write_wins() {
        let store = clients_store();
        let stored = store.insert(&"clients".into(), named("Acme")).await.unwrap();
        let id = stored.id().unwrap().clone();

        let updated = store
            .update(&"clients".into(), &id, named("Acme GmbH"))
            .await
            .unwrap();
        assert_eq!(updated.text(&"name".into()), Some("Acme GmbH"));

        // Second writer overwrites silently, no version check
        let clobbered = store
            .update(&"clients".into(), &id, named("Acme AG"))
            .await
            .unwrap();
        assert_eq!(clobbered.text(&"name".into()), Some("Acme AG"));
    }

    #[tokio::test]
    async fn test_alter_schema_is_idempotent() {
        let store = clients_store();
        let col = ColumnDef::new("created_at", "timestamp");
        store.alter_schema(&"clients".into(), col.clone()).await.unwrap();
        store.alter_schema(&"clients".into(), col).await.unwrap();

        let columns = store.columns(&"clients".into()).await.unwrap();
        let count = columns.iter().filter(|c| c.name == "created_at".into()).count();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_regenerate_descriptors_bootstraps_once() {
        let store = clients_store();
        let first = store.regenerate_descriptors(&"clients".into()).await.unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first[1].label, "Name");

        // Idempotent: repeat call changes nothing
        let again = store.regenerate_descriptors(&"clients".into()).await.unwrap();
        assert_eq!(again, first);
    }

    #[tokio::test]
    async fn test_select_with_contains_filter_and_order() {
        let store = clients_store();
        for name in ["Globex", "Acme", "Acme Holdings"] {
            store.insert(&"clients".into(), named(name)).await.unwrap();
        }

        let rows = store
            .select(
                &"clients".into(),
                Some(&Filter::contains_ci("name", "acme")),
                Some(&OrderBy::asc("name")),
            )
            .await
            .unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.text(&"name".into()).unwrap()).collect();
        assert_eq!(names, vec!["Acme", "Acme Holdings"]);
    }
}
