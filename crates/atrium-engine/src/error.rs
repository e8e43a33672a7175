//! Engine error types

use atrium_types::{ObjectName, RecordId};
use thiserror::Error;

/// Errors surfaced by page-level operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] atrium_store::StoreError),

    #[error(transparent)]
    Schema(#[from] atrium_schema::SchemaError),

    #[error(transparent)]
    Layout(#[from] atrium_layout::LayoutError),

    #[error(transparent)]
    Access(#[from] atrium_access::AccessError),

    #[error(transparent)]
    Render(#[from] atrium_render::RenderError),

    #[error(transparent)]
    Workflow(#[from] atrium_workflow::WorkflowError),

    /// A denied mutation that reached the engine anyway (stale UI
    /// state). Surfaces like a store error would, with a user-visible
    /// message; it is never a panic.
    #[error("permission denied: {action} on {object}")]
    PermissionDenied { object: ObjectName, action: String },

    #[error("record not found: {object}/{id}")]
    RecordMissing { object: ObjectName, id: RecordId },

    /// A save was attempted while another save on the same session is
    /// outstanding.
    #[error("a save is already in flight for this record")]
    SaveInFlight,
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
