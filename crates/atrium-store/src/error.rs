//! Store error types

use atrium_types::{FieldName, ObjectName, RecordId};
use thiserror::Error;

/// Errors surfaced by a record store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object type not found: {0}")]
    ObjectNotFound(ObjectName),

    #[error("record not found: {object}/{id}")]
    RecordNotFound { object: ObjectName, id: RecordId },

    #[error("constraint {constraint} violated by {field} = '{value}'")]
    ConstraintViolation {
        /// Backend constraint code/name (e.g. `uq_users_email`)
        constraint: String,
        field: FieldName,
        value: String,
    },

    #[error("schema alteration failed for {object}.{column}: {reason}")]
    SchemaAlteration {
        object: ObjectName,
        column: FieldName,
        reason: String,
    },

    #[error("malformed row value: {0}")]
    MalformedValue(#[from] atrium_types::ValueError),

    #[error("backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Human-readable message for the error banner.
    ///
    /// Known constraint violations name the offending field and value
    /// instead of leaking raw backend error text.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::ConstraintViolation { field, value, .. } => {
                format!(
                    "A record with {} '{}' already exists.",
                    FieldName::new(field.as_str()).humanize().to_lowercase(),
                    value
                )
            }
            StoreError::RecordNotFound { .. } => {
                "This record no longer exists. It may have been deleted.".to_string()
            }
            StoreError::ObjectNotFound(_)
            | StoreError::SchemaAlteration { .. }
            | StoreError::MalformedValue(_)
            | StoreError::Backend(_) => {
                "Something went wrong talking to the server. Please retry.".to_string()
            }
        }
    }

    /// Whether the operation is worth retrying as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Backend(_))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
