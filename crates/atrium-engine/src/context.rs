//! The explicitly constructed engine context
//!
//! Every cache (schema, permissions) lives here; composition points
//! receive the context instead of reaching for globals, and cache
//! invalidation is a method call, not a side effect.

use crate::error::{EngineError, EngineResult};
use atrium_access::{PermissionEngine, PermissionSource};
use atrium_layout::{LayoutComposer, LayoutSource};
use atrium_render::ReferenceCandidate;
use atrium_schema::SchemaRegistry;
use atrium_store::{Filter, OrderBy, RecordStore};
use atrium_types::{FieldAction, FieldName, ObjectAction, ObjectName, RecordId, Value};
use atrium_workflow::{Outcome, Stage, StateMachine, Transition};
use std::sync::Arc;

/// Result of clicking a pipeline stage through the engine
#[derive(Debug, Clone, PartialEq)]
pub enum StatusChange {
    /// The status was written; here is the stored row's new status
    Moved { to: Stage },

    /// The decision point was clicked; nothing was written. The UI
    /// must follow up with [`EngineContext::close_client`].
    NeedsDecision,
}

/// Owns the engine's collaborators and caches
pub struct EngineContext {
    store: Arc<dyn RecordStore>,
    registry: SchemaRegistry,
    composer: LayoutComposer,
    permissions: PermissionEngine,
    machine: StateMachine,
}

impl EngineContext {
    pub fn new(
        store: Arc<dyn RecordStore>,
        layout: Arc<dyn LayoutSource>,
        permissions: Arc<dyn PermissionSource>,
    ) -> Self {
        Self {
            registry: SchemaRegistry::new(store.clone()),
            composer: LayoutComposer::new(layout),
            permissions: PermissionEngine::new(permissions),
            machine: StateMachine::new(),
            store,
        }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn composer(&self) -> &LayoutComposer {
        &self.composer
    }

    pub fn permissions(&self) -> &PermissionEngine {
        &self.permissions
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    /// The UI regained focus: refresh schema metadata for the object
    /// types on screen. Failures keep the prior cache; nothing
    /// surfaces to the page.
    pub async fn on_focus(&self, objects: &[ObjectName]) {
        for object in objects {
            self.registry.refresh(object).await;
        }
    }

    /// Delete one record. Gated like any other mutation; the denial
    /// surfaces through the same banner path as a rejected save.
    pub async fn delete_record(
        &self,
        profile: &str,
        object: &ObjectName,
        id: &RecordId,
    ) -> EngineResult<()> {
        let allowed = self
            .permissions
            .can_object(profile, object, ObjectAction::Delete)
            .await?;
        if !allowed {
            return Err(EngineError::PermissionDenied {
                object: object.clone(),
                action: "delete".to_string(),
            });
        }
        self.store.delete(object, id).await?;
        Ok(())
    }

    /// Type-ahead candidates for a reference picker: case-insensitive
    /// substring match on the label field, ordered by label. An empty
    /// query lists everything.
    pub async fn reference_candidates(
        &self,
        profile: &str,
        object: &ObjectName,
        label_field: &FieldName,
        query: &str,
    ) -> EngineResult<Vec<ReferenceCandidate>> {
        let allowed = self
            .permissions
            .can_object(profile, object, ObjectAction::Read)
            .await?;
        if !allowed {
            return Err(EngineError::PermissionDenied {
                object: object.clone(),
                action: "read".to_string(),
            });
        }

        let filter = (!query.is_empty())
            .then(|| Filter::contains_ci(label_field.as_str(), query));
        let rows = self
            .store
            .select(object, filter.as_ref(), Some(&OrderBy::asc(label_field.as_str())))
            .await?;
        Ok(atrium_render::reference_candidates(&rows, label_field, None, ""))
    }

    /// Click an ordinary-chain stage or the decision point on a client
    /// record. A plain, permission-gated field update on `status`;
    /// the state machine decides whether anything is written.
    pub async fn change_status(
        &self,
        profile: &str,
        object: &ObjectName,
        id: &RecordId,
        target: Stage,
    ) -> EngineResult<StatusChange> {
        self.require_status_edit(profile, object).await?;

        let current = self.current_stage(object, id).await?;
        match self.machine.click_stage(current, target)? {
            Transition::Move { to, .. } => {
                self.write_status(object, id, to).await?;
                Ok(StatusChange::Moved { to })
            }
            Transition::NeedsDecision { .. } => Ok(StatusChange::NeedsDecision),
        }
    }

    /// The second step of the close interaction: commit won or lost.
    pub async fn close_client(
        &self,
        profile: &str,
        object: &ObjectName,
        id: &RecordId,
        outcome: Outcome,
    ) -> EngineResult<StatusChange> {
        self.require_status_edit(profile, object).await?;

        let current = self.current_stage(object, id).await?;
        let to = self.machine.decide(current, outcome)?;
        self.write_status(object, id, to).await?;
        Ok(StatusChange::Moved { to })
    }

    async fn require_status_edit(&self, profile: &str, object: &ObjectName) -> EngineResult<()> {
        let allowed = self
            .permissions
            .can_field(profile, object, &FieldName::new("status"), FieldAction::Edit)
            .await?;
        if !allowed {
            return Err(EngineError::PermissionDenied {
                object: object.clone(),
                action: "edit status".to_string(),
            });
        }
        Ok(())
    }

    async fn current_stage(&self, object: &ObjectName, id: &RecordId) -> EngineResult<Stage> {
        let record = self
            .store
            .get(object, id)
            .await?
            .ok_or_else(|| EngineError::RecordMissing {
                object: object.clone(),
                id: id.clone(),
            })?;
        let stored = record
            .text(&FieldName::new("status"))
            .unwrap_or_default()
            .to_string();
        Ok(self.machine.current(&stored)?)
    }

    async fn write_status(&self, object: &ObjectName, id: &RecordId, to: Stage) -> EngineResult<()> {
        let mut patch = atrium_types::Record::new();
        patch.set(FieldName::new("status"), Value::from(to.as_str()));
        self.store.update(object, id, patch).await?;
        Ok(())
    }
}
