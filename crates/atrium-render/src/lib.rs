//! Atrium Render - Per-field-type presentation and edit controls
//!
//! Given one field descriptor and a value, produce either a read-only
//! [`DisplayValue`] or an editable [`EditControl`]. Both are pure
//! functions of their inputs; the renderer never mutates a record.
//! Every edit path parses user input back into a scalar [`Value`]
//! which the caller merges into its staged copy.
//!
//! Dispatch is a single match over the closed [`FieldType`] union —
//! one presenter and one editor per variant. Unknown physical types
//! were already collapsed to `Text` at descriptor level, so there is
//! no implicit fallthrough here.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod display;
pub mod edit;
pub mod error;
pub mod resolve;

pub use display::{present, DisplayValue};
pub use edit::{edit, merge_date_edit, parse_input, EditControl};
pub use error::{RenderError, RenderResult};
pub use resolve::{reference_candidates, MapResolver, ReferenceCandidate, ReferenceResolver};
