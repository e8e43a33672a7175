//! Permission data sources
//!
//! Profiles and their permission sets are authored out-of-band. The
//! engine reads them through this seam so the identical checks can be
//! backed by remote calls server-side and by cached rows client-side.

use crate::error::{AccessError, AccessResult};
use async_trait::async_trait;
use atrium_store::{Filter, RecordStore};
use atrium_types::{
    FieldPermissions, ObjectPermissions, PermissionSet, Profile, Record, Value,
};
use dashmap::DashMap;
use std::sync::Arc;

/// Provider of profiles with their attached permission sets
#[async_trait]
pub trait PermissionSource: Send + Sync {
    /// `Ok(None)` for an unknown profile; the engine treats that as
    /// fully denied, not as an error.
    async fn profile(&self, name: &str) -> AccessResult<Option<Profile>>;
}

/// In-memory permission source
#[derive(Debug, Default)]
pub struct InMemoryPermissionSource {
    profiles: DashMap<String, Profile>,
}

impl InMemoryPermissionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_profile(&self, profile: Profile) {
        self.profiles.insert(profile.name.clone(), profile);
    }
}

#[async_trait]
impl PermissionSource for InMemoryPermissionSource {
    async fn profile(&self, name: &str) -> AccessResult<Option<Profile>> {
        Ok(self.profiles.get(name).map(|p| p.clone()))
    }
}

/// Permission source reading authored grant rows through the record
/// store.
///
/// Row shapes, by object type:
///
/// - `profiles`: `{ name }`
/// - `permission_sets`: `{ name, profile }`
/// - `object_permissions`: `{ permission_set, object, create, read, update, delete }`
/// - `field_permissions`: `{ permission_set, object, field, read, edit }`
///
/// Malformed rows fail closed: a grant boolean that is absent or not a
/// boolean reads as false, and a row without its key fields is skipped.
pub struct StorePermissionSource {
    store: Arc<dyn RecordStore>,
}

impl StorePermissionSource {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    async fn rows_where(
        &self,
        object: &str,
        key: &str,
        value: &str,
    ) -> AccessResult<Vec<Record>> {
        self.store
            .select(
                &object.into(),
                Some(&Filter::equals(key, Value::from(value))),
                None,
            )
            .await
            .map_err(|e| AccessError::Source(e.to_string()))
    }

    async fn load_set(&self, set_name: &str) -> AccessResult<PermissionSet> {
        let mut set = PermissionSet::new(set_name);

        for row in self.rows_where("object_permissions", "permission_set", set_name).await? {
            let Some(object) = row.text(&"object".into()) else { continue };
            set = set.grant_object(
                object.into(),
                ObjectPermissions {
                    create: bool_field(&row, "create"),
                    read: bool_field(&row, "read"),
                    update: bool_field(&row, "update"),
                    delete: bool_field(&row, "delete"),
                },
            );
        }

        for row in self.rows_where("field_permissions", "permission_set", set_name).await? {
            let Some(object) = row.text(&"object".into()) else { continue };
            let Some(field) = row.text(&"field".into()) else { continue };
            set = set.grant_field(
                object.into(),
                field.into(),
                FieldPermissions {
                    read: bool_field(&row, "read"),
                    edit: bool_field(&row, "edit"),
                },
            );
        }

        Ok(set)
    }
}

fn bool_field(row: &Record, name: &str) -> bool {
    row.get(&name.into())
        .and_then(Value::as_boolean)
        .unwrap_or(false)
}

#[async_trait]
impl PermissionSource for StorePermissionSource {
    async fn profile(&self, name: &str) -> AccessResult<Option<Profile>> {
        if self.rows_where("profiles", "name", name).await?.is_empty() {
            return Ok(None);
        }

        let mut profile = Profile::new(name);
        for row in self.rows_where("permission_sets", "profile", name).await? {
            let Some(set_name) = row.text(&"name".into()) else { continue };
            let set = self.load_set(set_name).await?;
            profile = profile.with_set(set);
        }
        Ok(Some(profile))
    }
}
