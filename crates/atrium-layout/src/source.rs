//! Layout block sources
//!
//! Layout rows are authored out-of-band like descriptors; the
//! composer reads them through this seam. The in-memory source serves
//! development and tests; a store-backed source implements the same
//! trait against the real backend.

use crate::error::LayoutResult;
use async_trait::async_trait;
use atrium_types::{LayoutBlock, ObjectName};
use dashmap::DashMap;

/// Provider of authored layout blocks
#[async_trait]
pub trait LayoutSource: Send + Sync {
    /// All layout rows of an object type, unscoped and unfiltered.
    async fn blocks(&self, object: &ObjectName) -> LayoutResult<Vec<LayoutBlock>>;
}

/// In-memory layout source
#[derive(Debug, Default)]
pub struct InMemoryLayoutSource {
    blocks: DashMap<ObjectName, Vec<LayoutBlock>>,
}

impl InMemoryLayoutSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the authored rows for an object type.
    pub fn set_blocks(&self, object: ObjectName, blocks: Vec<LayoutBlock>) {
        self.blocks.insert(object, blocks);
    }
}

#[async_trait]
impl LayoutSource for InMemoryLayoutSource {
    async fn blocks(&self, object: &ObjectName) -> LayoutResult<Vec<LayoutBlock>> {
        Ok(self
            .blocks
            .get(object)
            .map(|b| b.clone())
            .unwrap_or_default())
    }
}
