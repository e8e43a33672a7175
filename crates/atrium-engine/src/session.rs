//! Optimistic local edit sessions
//!
//! Entering edit mode snapshots the record; all edits mutate only the
//! snapshot. Cancel discards it. Save submits the entire snapshot —
//! not a diff — last-write-wins, and on success adopts the server's
//! returned row as both the committed record and the fresh snapshot,
//! picking up server-computed fields.
//!
//! There is no cooperative cancellation of an in-flight save; the
//! session's `saving` flag only prevents a second save from starting
//! while one is outstanding.

use crate::context::EngineContext;
use crate::error::{EngineError, EngineResult};
use atrium_render::parse_input;
use atrium_store::{apply_audit_stamps, ensure_audit_columns};
use atrium_types::{FieldDescriptor, FieldName, ObjectAction, ObjectName, Record, RecordId, Value};
use tracing::warn;

/// A staged copy of one record being edited
#[derive(Debug)]
pub struct EditSession {
    object: ObjectName,
    committed: Record,
    staged: Record,
    creating: bool,
    saving: bool,
    /// Who is editing, for created_by/updated_by stamps
    actor: Option<RecordId>,
}

impl EditSession {
    /// Open edit mode on an existing record.
    pub fn begin(object: ObjectName, record: Record) -> Self {
        Self {
            staged: record.snapshot(),
            committed: record,
            object,
            creating: false,
            saving: false,
            actor: None,
        }
    }

    /// Start a new record of the object type.
    pub fn begin_new(object: ObjectName) -> Self {
        Self {
            object,
            committed: Record::new(),
            staged: Record::new(),
            creating: true,
            saving: false,
            actor: None,
        }
    }

    pub fn with_actor(mut self, actor: RecordId) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn staged(&self) -> &Record {
        &self.staged
    }

    pub fn committed(&self) -> &Record {
        &self.committed
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Stage a parsed scalar directly.
    pub fn stage(&mut self, field: FieldName, value: Value) {
        self.staged.set(field, value);
    }

    /// Parse raw editor input for a field and stage the result. The
    /// prior *staged* value feeds the date-merge policy.
    pub fn stage_input(&mut self, descriptor: &FieldDescriptor, raw: &str) -> EngineResult<()> {
        let prior = self.staged.get(&descriptor.api_name);
        let value = parse_input(descriptor, raw, prior)?;
        self.staged.set(descriptor.api_name.clone(), value);
        Ok(())
    }

    /// Discard the snapshot and revert to the last committed record.
    pub fn cancel(&mut self) {
        self.staged = self.committed.snapshot();
    }

    /// Submit the whole snapshot.
    ///
    /// Pipeline: permission re-check at the mutation boundary, then
    /// best-effort audit widening, then audit stamps for columns that
    /// exist, then insert or update. On success the server row
    /// replaces both the committed record and the snapshot.
    pub async fn save(&mut self, ctx: &EngineContext, profile: &str) -> EngineResult<Record> {
        if self.saving {
            return Err(EngineError::SaveInFlight);
        }
        self.saving = true;
        let result = self.save_inner(ctx, profile).await;
        self.saving = false;
        result
    }

    async fn save_inner(&mut self, ctx: &EngineContext, profile: &str) -> EngineResult<Record> {
        let action = if self.creating {
            ObjectAction::Create
        } else {
            ObjectAction::Update
        };
        let allowed = ctx
            .permissions()
            .can_object(profile, &self.object, action)
            .await?;
        if !allowed {
            return Err(EngineError::PermissionDenied {
                object: self.object.clone(),
                action: format!("{action:?}").to_lowercase(),
            });
        }

        // Phase one: make sure the audit quartet exists. Best-effort;
        // a failure here must not block the user's save.
        let columns = match ensure_audit_columns(ctx.store().as_ref(), &self.object).await {
            Ok(columns) => columns,
            Err(err) => {
                warn!(object = %self.object, error = %err, "audit widening unavailable, saving without stamps");
                Vec::new()
            }
        };
        apply_audit_stamps(&mut self.staged, &columns, self.actor.as_ref(), self.creating);

        // Phase two: the write itself, whole snapshot, no version check
        let stored = if self.creating {
            ctx.store().insert(&self.object, self.staged.clone()).await?
        } else {
            let id = self
                .staged
                .id()
                .cloned()
                .ok_or_else(|| EngineError::Store(atrium_store::StoreError::Backend(
                    "cannot update a record without an id".to_string(),
                )))?;
            ctx.store().update(&self.object, &id, self.staged.clone()).await?
        };

        self.committed = stored.clone();
        self.staged = stored.snapshot();
        self.creating = false;
        Ok(stored)
    }
}
