//! Detail page composition
//!
//! Loads one record with its descriptors, layout sections, and
//! per-field display values. Missing metadata is never fatal: an
//! object type without descriptors degrades to raw-column fallback
//! labels; a dangling reference degrades to its raw key.

use crate::context::EngineContext;
use crate::error::{EngineError, EngineResult};
use atrium_layout::TabLayout;
use atrium_render::{present, DisplayValue, MapResolver};
use atrium_types::{
    FieldAction, FieldDescriptor, FieldType, ObjectAction, ObjectName, Record, RecordId,
};
use atrium_workflow::Stage;
use tracing::warn;

/// One field of the detail page, ready for the view layer
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayField {
    pub descriptor: FieldDescriptor,
    pub value: DisplayValue,
    /// Whether an edit affordance may be shown. UX gating only; the
    /// save path re-checks at the mutation boundary.
    pub editable: bool,
}

/// Progress-bar state derived from the record's status field
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineProgress {
    pub stage: Stage,
    pub position: usize,
}

/// A loaded record detail page
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPage {
    pub object: ObjectName,
    pub record: Record,
    pub layout: TabLayout,
    pub fields: Vec<DisplayField>,
    /// Present when the record carries a parseable status value,
    /// legacy vocabulary included
    pub pipeline: Option<PipelineProgress>,
}

impl DetailPage {
    /// Load the detail page for one record.
    ///
    /// Fields the profile cannot read are omitted entirely; fields it
    /// can read but not edit come back with `editable = false`.
    pub async fn load(
        ctx: &EngineContext,
        profile: &str,
        object: &ObjectName,
        id: &RecordId,
        tab: Option<&str>,
    ) -> EngineResult<DetailPage> {
        let can_read = ctx
            .permissions()
            .can_object(profile, object, ObjectAction::Read)
            .await?;
        if !can_read {
            return Err(EngineError::PermissionDenied {
                object: object.clone(),
                action: "read".to_string(),
            });
        }

        let mut descriptors = ctx.registry().descriptors(object).await?;
        if descriptors.is_empty() {
            // No authored metadata: degrade to raw column names
            descriptors = ctx.registry().fallback_descriptors(object).await?;
        }

        let layout = ctx.composer().blocks(object, tab, &descriptors).await?;

        let record = ctx
            .store()
            .get(object, id)
            .await?
            .ok_or_else(|| EngineError::RecordMissing {
                object: object.clone(),
                id: id.clone(),
            })?;

        let resolver = Self::resolve_references(ctx, &descriptors, &record).await;

        let can_update = ctx
            .permissions()
            .can_object(profile, object, ObjectAction::Update)
            .await?;

        let mut fields = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let readable = ctx
                .permissions()
                .can_field(profile, object, &descriptor.api_name, FieldAction::Read)
                .await?;
            if !readable {
                continue;
            }
            let editable = can_update
                && !descriptor.system
                && ctx
                    .permissions()
                    .can_field(profile, object, &descriptor.api_name, FieldAction::Edit)
                    .await?;

            let value = present(&descriptor, record.get(&descriptor.api_name), &resolver);
            fields.push(DisplayField {
                descriptor,
                value,
                editable,
            });
        }

        let pipeline = record
            .text(&"status".into())
            .and_then(Stage::parse)
            .map(|stage| PipelineProgress {
                position: stage.chain_position(),
                stage,
            });

        Ok(DetailPage {
            object: object.clone(),
            record,
            layout,
            fields,
            pipeline,
        })
    }

    /// Pre-fetch the records behind reference fields so `present` can
    /// stay pure. A fetch failure leaves the key unresolved; the
    /// presenter falls back to the raw value.
    async fn resolve_references(
        ctx: &EngineContext,
        descriptors: &[FieldDescriptor],
        record: &Record,
    ) -> MapResolver {
        let mut resolver = MapResolver::new();
        for descriptor in descriptors {
            let FieldType::Reference { object, .. } = &descriptor.field_type else {
                continue;
            };
            let Some(id) = record.get(&descriptor.api_name).and_then(|v| v.as_id()) else {
                continue;
            };
            match ctx.store().get(object, id).await {
                Ok(Some(referenced)) => resolver.add(object.clone(), referenced),
                Ok(None) => {} // deleted target; raw key fallback
                Err(err) => {
                    warn!(object = %object, id = %id, error = %err, "reference lookup failed, presenting raw key");
                }
            }
        }
        resolver
    }
}
