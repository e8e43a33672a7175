//! Cached descriptor lookup per object type
//!
//! The cache holds the full authored set per object type; visible
//! filtering happens on read. A refresh replaces the cache entry
//! wholesale, so renderers already holding a list never observe a
//! torn state. Invalidation is an explicit method call, typically
//! wired to the UI regaining focus.

use crate::error::SchemaResult;
use atrium_store::RecordStore;
use atrium_types::{FieldDescriptor, ObjectName};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Registry of field descriptors with per-object-type caching
pub struct SchemaRegistry {
    store: Arc<dyn RecordStore>,
    cache: DashMap<ObjectName, Arc<Vec<FieldDescriptor>>>,
}

impl SchemaRegistry {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            cache: DashMap::new(),
        }
    }

    /// Visible descriptors for an object type, in display order.
    ///
    /// No descriptors authored is an empty result, not an error; the
    /// caller is expected to fall back to [`Self::fallback_descriptors`].
    pub async fn descriptors(&self, object: &ObjectName) -> SchemaResult<Vec<FieldDescriptor>> {
        let all = self.load(object).await?;
        Ok(all.iter().filter(|d| d.visible).cloned().collect())
    }

    /// The full set, hidden descriptors included. Administrative
    /// callers only.
    pub async fn all_descriptors(&self, object: &ObjectName) -> SchemaResult<Vec<FieldDescriptor>> {
        let all = self.load(object).await?;
        Ok(all.as_ref().clone())
    }

    /// Descriptors built from raw physical column names when no
    /// metadata exists: humanized label, text type, authored order by
    /// column position.
    pub async fn fallback_descriptors(
        &self,
        object: &ObjectName,
    ) -> SchemaResult<Vec<FieldDescriptor>> {
        let columns = self.store.columns(object).await?;
        Ok(columns
            .into_iter()
            .enumerate()
            .map(|(i, c)| FieldDescriptor::fallback(object.clone(), c.name, i as i32))
            .collect())
    }

    /// One-time bootstrap: regenerate descriptors from the physical
    /// schema when none exist. Idempotent, safe to call repeatedly.
    pub async fn resync(&self, object: &ObjectName) -> SchemaResult<Vec<FieldDescriptor>> {
        let descriptors = self.store.regenerate_descriptors(object).await?;
        self.replace_cache(object, descriptors.clone());
        Ok(descriptors.into_iter().filter(|d| d.visible).collect())
    }

    /// Drop the cached entry for one object type. The next read
    /// re-fetches from the store.
    pub fn invalidate(&self, object: &ObjectName) {
        debug!(object = %object, "schema cache invalidated");
        self.cache.remove(object);
    }

    pub fn invalidate_all(&self) {
        debug!("schema cache fully invalidated");
        self.cache.clear();
    }

    /// Focus-triggered refresh: re-fetch and atomically replace the
    /// cached list. A fetch failure keeps serving the prior cache and
    /// is logged, never surfaced to the page.
    pub async fn refresh(&self, object: &ObjectName) {
        match self.store.descriptors(object).await {
            Ok(mut descriptors) => {
                descriptors.sort_by_key(|d| d.display_order);
                self.replace_cache(object, descriptors);
            }
            Err(err) => {
                warn!(object = %object, error = %err, "focus refresh of schema metadata failed, keeping cached descriptors");
            }
        }
    }

    async fn load(&self, object: &ObjectName) -> SchemaResult<Arc<Vec<FieldDescriptor>>> {
        if let Some(cached) = self.cache.get(object) {
            return Ok(cached.clone());
        }
        let mut descriptors = self.store.descriptors(object).await?;
        descriptors.sort_by_key(|d| d.display_order);
        let entry = Arc::new(descriptors);
        self.cache.insert(object.clone(), entry.clone());
        Ok(entry)
    }

    fn replace_cache(&self, object: &ObjectName, mut descriptors: Vec<FieldDescriptor>) {
        descriptors.sort_by_key(|d| d.display_order);
        self.cache.insert(object.clone(), Arc::new(descriptors));
    }
}
