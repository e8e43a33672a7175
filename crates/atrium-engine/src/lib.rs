//! Atrium Engine - Composition root
//!
//! Wires the schema registry, layout composer, field renderer,
//! permission engine, workflow state machine, and record store into
//! page-level operations:
//!
//! - **DetailPage::load**: descriptors -> layout -> per-field display,
//!   with reference pre-resolution and permission gating.
//! - **EditSession**: optimistic local staging. Entering edit mode
//!   snapshots the record; edits touch only the snapshot; save submits
//!   the whole snapshot last-write-wins and adopts the server row.
//! - **Status changes**: routed through the workflow state machine,
//!   gated by the same permission checks as any field edit.
//! - **ErrorBanner**: every failure resolves to a visible banner or a
//!   logged no-op; nothing here panics a page.
//!
//! There are no globals: every cache lives in an explicitly
//! constructed [`EngineContext`] handed to the composition points.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod banner;
pub mod context;
pub mod error;
pub mod page;
pub mod session;

pub use banner::ErrorBanner;
pub use context::{EngineContext, StatusChange};
pub use error::{EngineError, EngineResult};
pub use page::{DetailPage, DisplayField, PipelineProgress};
pub use session::EditSession;
