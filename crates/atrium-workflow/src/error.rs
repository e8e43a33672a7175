//! Workflow error types

use crate::stage::Stage;
use thiserror::Error;

/// Errors from workflow transitions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    #[error("unknown status value: '{0}'")]
    UnknownStatus(String),

    #[error("closing a client requires an explicit won/lost decision")]
    DecisionRequired,

    #[error("cannot decide won/lost from {0}; only certificate_sent sits at the decision point")]
    NotAtDecisionPoint(Stage),
}

/// Result type alias for workflow operations
pub type WorkflowResult<T> = Result<T, WorkflowError>;
