//! Permission engine error types

use thiserror::Error;

/// Errors from permission resolution.
///
/// A denial is not an error; denied checks return `Ok(false)`. Errors
/// here mean the profile data itself could not be loaded.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("permission source failure: {0}")]
    Source(String),
}

/// Result type for permission operations
pub type AccessResult<T> = Result<T, AccessError>;
