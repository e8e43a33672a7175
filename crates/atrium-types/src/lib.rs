//! Atrium Types - Core domain types for the metadata-driven engine
//!
//! Atrium renders and mutates business records (clients, channel
//! partners, billing rows, users) from *metadata*, not hard-coded
//! per-entity views. This crate holds the shared vocabulary:
//!
//! - **FieldDescriptor**: how one column of an object type is labeled,
//!   typed, grouped, and gated.
//! - **LayoutBlock**: one placement unit (field or related list) in a
//!   page layout.
//! - **Value** / **Record**: a closed scalar union and a fail-closed
//!   map from api names to values. A missing key is *absent*, never an
//!   implicit default.
//! - **Profile** / **PermissionSet**: the opt-in, additive permission
//!   model. No permission row means no access.
//! - **Option catalogs**: the static closed-select catalogs
//!   (`status`, `iso_standard`) shared by the renderer and the
//!   workflow machine.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod catalog;
pub mod field;
pub mod ids;
pub mod layout;
pub mod permission;
pub mod record;
pub mod value;

// Re-export main types
pub use catalog::{OptionCatalog, SelectOption, ValidationRule, ValidationRuleKind};
pub use field::{DateKind, FieldDescriptor, FieldType, FieldWidth, NumberKind};
pub use ids::{FieldName, ObjectName, RecordId};
pub use layout::{BlockKind, LayoutBlock};
pub use permission::{
    FieldAction, FieldPermissions, ObjectAction, ObjectPermissions, PermissionSet, Profile,
};
pub use record::Record;
pub use value::{Value, ValueError};
