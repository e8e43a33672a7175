//! User-facing error surfacing
//!
//! Store failures become a dismissible banner with a retry action;
//! constraint violations name the offending field and value instead
//! of leaking backend error text; permission denials read the same
//! whether they came from gating or from a rejected mutation.

use crate::error::EngineError;

/// An inline, dismissible error banner
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBanner {
    pub message: String,
    /// Whether a retry action makes sense for this failure
    pub retryable: bool,
}

impl ErrorBanner {
    pub fn from_error(err: &EngineError) -> Self {
        match err {
            EngineError::Store(store) => Self {
                message: store.user_message(),
                retryable: store.is_retryable(),
            },
            EngineError::Schema(_) | EngineError::Layout(_) | EngineError::Access(_) => Self {
                message: "Something went wrong talking to the server. Please retry.".to_string(),
                retryable: true,
            },
            EngineError::Render(render) => Self {
                message: render.to_string(),
                retryable: false,
            },
            EngineError::Workflow(workflow) => Self {
                message: workflow.to_string(),
                retryable: false,
            },
            EngineError::PermissionDenied { .. } => Self {
                message: "You do not have permission to do that.".to_string(),
                retryable: false,
            },
            EngineError::RecordMissing { .. } => Self {
                message: "This record no longer exists. It may have been deleted.".to_string(),
                retryable: false,
            },
            EngineError::SaveInFlight => Self {
                message: "Still saving, hold on a moment.".to_string(),
                retryable: false,
            },
        }
    }
}

impl From<&EngineError> for ErrorBanner {
    fn from(err: &EngineError) -> Self {
        Self::from_error(err)
    }
}
