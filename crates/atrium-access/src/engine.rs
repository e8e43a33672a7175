//! Additive, fail-closed permission resolution

use crate::error::AccessResult;
use crate::source::PermissionSource;
use atrium_types::{FieldAction, FieldName, ObjectAction, ObjectName, Profile};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Resolves object- and field-level permission checks for profiles
pub struct PermissionEngine {
    source: Arc<dyn PermissionSource>,
    cache: DashMap<String, Arc<Profile>>,
}

impl PermissionEngine {
    pub fn new(source: Arc<dyn PermissionSource>) -> Self {
        Self {
            source,
            cache: DashMap::new(),
        }
    }

    /// Can the profile perform `action` on the object type?
    ///
    /// Granted if *any* attached permission set grants it. An unknown
    /// profile, a profile without sets, or sets without a matching
    /// grant all resolve to `Ok(false)`.
    pub async fn can_object(
        &self,
        profile: &str,
        object: &ObjectName,
        action: ObjectAction,
    ) -> AccessResult<bool> {
        let Some(profile) = self.load(profile).await? else {
            return Ok(false);
        };
        Ok(profile
            .permission_sets
            .iter()
            .any(|set| set.object_allows(object, action)))
    }

    /// Can the profile perform `action` on the given field?
    pub async fn can_field(
        &self,
        profile: &str,
        object: &ObjectName,
        field: &FieldName,
        action: FieldAction,
    ) -> AccessResult<bool> {
        let Some(profile) = self.load(profile).await? else {
            return Ok(false);
        };
        Ok(profile
            .permission_sets
            .iter()
            .any(|set| set.field_allows(object, field, action)))
    }

    /// Drop the cached grants for one profile; the next check
    /// re-fetches from the source.
    pub fn invalidate(&self, profile: &str) {
        debug!(profile, "permission cache invalidated");
        self.cache.remove(profile);
    }

    pub fn invalidate_all(&self) {
        self.cache.clear();
    }

    async fn load(&self, name: &str) -> AccessResult<Option<Arc<Profile>>> {
        if let Some(cached) = self.cache.get(name) {
            return Ok(Some(cached.clone()));
        }
        match self.source.profile(name).await? {
            Some(profile) => {
                let entry = Arc::new(profile);
                self.cache.insert(name.to_string(), entry.clone());
                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryPermissionSource;
    use atrium_types::{FieldPermissions, ObjectPermissions, PermissionSet};

    fn engine_with(profiles: Vec<Profile>) -> PermissionEngine {
        let source = InMemoryPermissionSource::new();
        for p in profiles {
            source.add_profile(p);
        }
        PermissionEngine::new(Arc::new(source))
    }

    fn viewer() -> Profile {
        Profile::new("viewer").with_set(
            PermissionSet::new("clients_read")
                .grant_object("clients".into(), ObjectPermissions::read_only())
                .grant_field("clients".into(), "name".into(), FieldPermissions::read_only())
                .grant_field("clients".into(), "status".into(), FieldPermissions::read_only()),
        )
    }

    #[tokio::test]
    async fn test_no_permission_sets_denies_everything() {
        let engine = engine_with(vec![Profile::new("empty")]);
        assert!(!engine
            .can_object("empty", &"clients".into(), ObjectAction::Read)
            .await
            .unwrap());
        assert!(!engine
            .can_field("empty", &"clients".into(), &"name".into(), FieldAction::Read)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_unknown_profile_denies() {
        let engine = engine_with(vec![]);
        assert!(!engine
            .can_object("ghost", &"clients".into(), ObjectAction::Read)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_viewer_reads_but_never_edits() {
        let engine = engine_with(vec![viewer()]);

        assert!(engine
            .can_object("viewer", &"clients".into(), ObjectAction::Read)
            .await
            .unwrap());
        assert!(!engine
            .can_object("viewer", &"clients".into(), ObjectAction::Update)
            .await
            .unwrap());
        assert!(engine
            .can_field("viewer", &"clients".into(), &"status".into(), FieldAction::Read)
            .await
            .unwrap());
        assert!(!engine
            .can_field("viewer", &"clients".into(), &"status".into(), FieldAction::Edit)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_union_across_sets_is_additive() {
        let profile = Profile::new("manager")
            .with_set(
                PermissionSet::new("clients_read")
                    .grant_object("clients".into(), ObjectPermissions::read_only()),
            )
            .with_set(
                PermissionSet::new("clients_write")
                    .grant_object("clients".into(), ObjectPermissions::full()),
            );
        let engine = engine_with(vec![profile]);

        // The read-only set never subtracts what the full set grants
        assert!(engine
            .can_object("manager", &"clients".into(), ObjectAction::Delete)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_invalidate_picks_up_grant_changes() {
        let source = Arc::new(InMemoryPermissionSource::new());
        source.add_profile(Profile::new("ops"));
        let engine = PermissionEngine::new(source.clone());

        assert!(!engine
            .can_object("ops", &"clients".into(), ObjectAction::Read)
            .await
            .unwrap());

        source.add_profile(Profile::new("ops").with_set(
            PermissionSet::new("r").grant_object("clients".into(), ObjectPermissions::read_only()),
        ));
        // Cached denial until invalidated
        assert!(!engine
            .can_object("ops", &"clients".into(), ObjectAction::Read)
            .await
            .unwrap());

        engine.invalidate("ops");
        assert!(engine
            .can_object("ops", &"clients".into(), ObjectAction::Read)
            .await
            .unwrap());
    }
}
