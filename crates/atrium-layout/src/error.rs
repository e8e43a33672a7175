//! Layout composer error types

use thiserror::Error;

/// Errors from layout composition
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("store failure while loading layout blocks: {0}")]
    Store(#[from] atrium_store::StoreError),
}

/// Result type for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;
