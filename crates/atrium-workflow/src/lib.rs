//! Atrium Workflow - Client pipeline state machine
//!
//! Governs the legal sequence of `status` values on a client record:
//! an ordinary chain of five stages followed by a decision point that
//! forks into exactly two terminal stages.
//!
//! ```text
//! form_sent -> form_received -> draft_reviewed -> draft_approved
//!     -> certificate_sent -> { closed_won | closed_lost }
//! ```
//!
//! Any ordinary-chain stage is directly clickable, forward or
//! backward — the chain is not monotonic. The terminals are reachable
//! only through an explicit two-step decision from `certificate_sent`,
//! never by a single click.
//!
//! Older records carry a legacy status vocabulary; parsing maps both
//! vocabularies onto the same chain positions without rewriting the
//! stored value.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod error;
pub mod machine;
pub mod stage;

pub use error::{WorkflowError, WorkflowResult};
pub use machine::{Outcome, StateMachine, Transition};
pub use stage::Stage;
