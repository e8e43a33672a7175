//! Renderer error types

use atrium_types::FieldName;
use thiserror::Error;

/// Errors from parsing user input back into a scalar value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    #[error("'{0}' is not a valid calendar date")]
    InvalidDate(String),

    #[error("'{0}' is not a valid record reference")]
    InvalidReference(String),

    #[error("'{value}' is not an option for {field}")]
    UnknownOption { field: FieldName, value: String },
}

/// Result type for renderer operations
pub type RenderResult<T> = Result<T, RenderError>;
