//! Atrium Access - Permission engine
//!
//! Answers create/read/update/delete questions per object type and
//! read/edit questions per field, for a named profile. Resolution is
//! a union across every permission set attached to the profile:
//! permissions are additive, never restrictive. Absence of a set or a
//! grant row resolves to false — access is opt-in.
//!
//! The same checks run twice by design: once before rendering edit
//! affordances (UX gating) and again at the mutation boundary. UI
//! gating is a convenience, not enforcement.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod engine;
pub mod error;
pub mod source;

pub use engine::PermissionEngine;
pub use error::{AccessError, AccessResult};
pub use source::{InMemoryPermissionSource, PermissionSource, StorePermissionSource};
