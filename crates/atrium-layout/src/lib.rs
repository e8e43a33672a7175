//! Atrium Layout - Layout composer
//!
//! Loads the ordered layout blocks of an object type (optionally
//! scoped to a tab) and groups them into display sections:
//!
//! - blocks partition by section key
//! - a section's sort key is the minimum display order of its members
//! - sections order ascending by that key, blocks ascending within
//!
//! A tab with no rows at all is **unconfigured**, which is distinct
//! from a tab whose rows all filtered out (configured but empty), so
//! the UI can show a configuration hint instead of a blank area.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod composer;
pub mod error;
pub mod source;

pub use composer::{LayoutComposer, Section, TabLayout};
pub use error::{LayoutError, LayoutResult};
pub use source::{InMemoryLayoutSource, LayoutSource};
