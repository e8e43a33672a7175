//! Layout blocks - placement units within a page layout
//!
//! A LayoutBlock places either a single field or a related-record list
//! into a named section of a tab. Blocks are grouped into sections by
//! the layout composer; this crate only carries the rows.

use crate::ids::{FieldName, ObjectName};
use serde::{Deserialize, Serialize};

/// What a block places on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockKind {
    /// A single field, referencing a FieldDescriptor by api name
    Field { field: FieldName },

    /// An embedded list of records from another object type
    RelatedList { object: ObjectName },
}

/// One placement row of a page layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutBlock {
    /// Object type whose page this block belongs to
    pub object: ObjectName,

    /// Tab identifier, when the page has tabs
    pub tab: Option<String>,

    /// Field or related-list placement
    pub kind: BlockKind,

    /// Section grouping key
    pub section: String,

    /// Ascending sort key within the section
    pub display_order: i32,

    /// Hidden blocks are dropped before grouping
    pub visible: bool,
}

impl LayoutBlock {
    pub fn field_name(&self) -> Option<&FieldName> {
        match &self.kind {
            BlockKind::Field { field } => Some(field),
            BlockKind::RelatedList { .. } => None,
        }
    }
}
