//! Stage transition rules

use crate::error::{WorkflowError, WorkflowResult};
use crate::stage::Stage;
use tracing::info;

/// The explicit second step of closing a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn stage(&self) -> Stage {
        match self {
            Outcome::Won => Stage::ClosedWon,
            Outcome::Lost => Stage::ClosedLost,
        }
    }
}

/// Result of clicking a stage on the progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Status moves to the clicked stage
    Move { from: Stage, to: Stage },

    /// The decision point was clicked; the status does not change
    /// until [`StateMachine::decide`] supplies the won/lost choice
    NeedsDecision { from: Stage },
}

/// Enforces the pipeline's transition rules
#[derive(Debug, Clone, Copy, Default)]
pub struct StateMachine;

impl StateMachine {
    pub fn new() -> Self {
        Self
    }

    /// Parse a stored status, accepting both vocabularies. Records
    /// with an unparseable status cannot transition.
    pub fn current(&self, stored: &str) -> WorkflowResult<Stage> {
        Stage::parse(stored).ok_or_else(|| WorkflowError::UnknownStatus(stored.to_string()))
    }

    /// Click an ordinary-chain stage: the status moves there directly,
    /// forward or backward. Clicking a terminal stage never moves the
    /// status in one step; it demands the explicit decision.
    pub fn click_stage(&self, current: Stage, target: Stage) -> WorkflowResult<Transition> {
        if target.is_terminal() {
            // Even from certificate_sent a single click is not enough
            return if current == Stage::CertificateSent {
                Ok(Transition::NeedsDecision { from: current })
            } else {
                Err(WorkflowError::DecisionRequired)
            };
        }

        info!(from = %current, to = %target, "pipeline stage change");
        Ok(Transition::Move {
            from: current,
            to: target,
        })
    }

    /// The second step of the close interaction: commit the won/lost
    /// choice. Only valid at the decision point.
    pub fn decide(&self, current: Stage, outcome: Outcome) -> WorkflowResult<Stage> {
        if current != Stage::CertificateSent {
            return Err(WorkflowError::NotAtDecisionPoint(current));
        }
        let to = outcome.stage();
        info!(from = %current, to = %to, "pipeline closed");
        Ok(to)
    }
}
