//! Schema registry error types

use thiserror::Error;

/// Errors from schema registry operations
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("store failure while loading schema metadata: {0}")]
    Store(#[from] atrium_store::StoreError),
}

/// Result type for schema registry operations
pub type SchemaResult<T> = Result<T, SchemaError>;
