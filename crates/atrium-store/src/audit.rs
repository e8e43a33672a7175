//! Audit-column widening
//!
//! Before a write carrying created/updated audit semantics, the engine
//! ensures the object type physically has the audit quartet. Widening
//! is an explicit phase separate from the write itself, so the two can
//! be tested and mocked independently. It is additive, idempotent, and
//! best-effort: a column that cannot be added is logged and skipped,
//! and the write proceeds without populating it.

use crate::error::StoreResult;
use crate::traits::{ColumnDef, RecordStore};
use atrium_types::{FieldName, Record, RecordId, Value};
use chrono::Utc;
use tracing::warn;

/// The audit quartet: (column, physical type, current-time default)
pub const AUDIT_COLUMNS: [(&str, &str, bool); 4] = [
    ("created_at", "timestamp", true),
    ("updated_at", "timestamp", true),
    ("created_by", "uuid", false),
    ("updated_by", "uuid", false),
];

pub fn is_audit_column(name: &FieldName) -> bool {
    AUDIT_COLUMNS.iter().any(|(n, _, _)| *n == name.as_str())
}

/// Ensure the audit quartet exists on `object`, then return the full
/// column list as it stands afterwards.
///
/// Failures to add a column are swallowed after a `warn!`; the caller
/// populates only columns present in the returned snapshot.
pub async fn ensure_audit_columns(
    store: &dyn RecordStore,
    object: &atrium_types::ObjectName,
) -> StoreResult<Vec<ColumnDef>> {
    let present = store.columns(object).await?;

    for (name, physical_type, now_default) in AUDIT_COLUMNS {
        let field = FieldName::new(name);
        if present.iter().any(|c| c.name == field) {
            continue;
        }
        let mut column = ColumnDef::new(name, physical_type);
        if now_default {
            column = column.with_default(serde_json::json!("now()"));
        }
        if let Err(err) = store.alter_schema(object, column).await {
            warn!(object = %object, column = name, error = %err, "audit column widening failed, proceeding without it");
        }
    }

    store.columns(object).await
}

/// Stamp audit fields onto a staged row, but only for columns the
/// current schema snapshot actually has.
pub fn apply_audit_stamps(
    row: &mut Record,
    columns: &[ColumnDef],
    actor: Option<&RecordId>,
    creating: bool,
) {
    let has = |name: &str| columns.iter().any(|c| c.name.as_str() == name);
    let now = Value::Timestamp(Utc::now());

    if creating && has("created_at") {
        row.set(FieldName::new("created_at"), now.clone());
    }
    if has("updated_at") {
        row.set(FieldName::new("updated_at"), now);
    }
    if let Some(actor) = actor {
        if creating && has("created_by") {
            row.set(FieldName::new("created_by"), Value::Id(actor.clone()));
        }
        if has("updated_by") {
            row.set(FieldName::new("updated_by"), Value::Id(actor.clone()));
        }
    }
}
