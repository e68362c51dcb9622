//! Heavy-data ownership for documents read back from their tagged form.
//!
//! The reader never owns bulk arrays. When a `DataItem` names heavy data in
//! its text content, the reader asks a [`HeavyDataResolver`] for the handle
//! and binds the item's buffer weakly; the resolver keeps the storage alive.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::data::buffer::HeavyDataHandle;

/// Resolves the textual reference stored in a `DataItem` to a live handle.
///
/// Implementations must own the handles they return: bindings only hold
/// weak references.
pub trait HeavyDataResolver: Send + Sync {
    /// Look up the handle addressed by `reference`.
    fn resolve(&self, reference: &str) -> Option<Arc<dyn HeavyDataHandle>>;
}

/// Owning table of heavy-data handles keyed by their reference text.
#[derive(Debug, Default)]
pub struct HeavyDataStore {
    handles: BTreeMap<String, Arc<dyn HeavyDataHandle>>,
}

impl HeavyDataStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `handle` under its own reference.
    ///
    /// Returns the handle previously stored under the same reference.
    pub fn insert(&mut self, handle: Arc<dyn HeavyDataHandle>) -> Option<Arc<dyn HeavyDataHandle>> {
        self.handles.insert(handle.reference(), handle)
    }

    /// Borrow the handle stored under `reference`.
    pub fn get(&self, reference: &str) -> Option<&Arc<dyn HeavyDataHandle>> {
        self.handles.get(reference)
    }

    /// Release the handle stored under `reference`. Buffers bound to it
    /// report it as released afterwards unless another owner remains.
    pub fn remove(&mut self, reference: &str) -> Option<Arc<dyn HeavyDataHandle>> {
        self.handles.remove(reference)
    }

    /// Number of handles owned.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True if the store owns no handles.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl HeavyDataResolver for HeavyDataStore {
    fn resolve(&self, reference: &str) -> Option<Arc<dyn HeavyDataHandle>> {
        self.handles.get(reference.trim()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::buffer::{DataBuffer, InMemoryHandle};

    #[test]
    fn store_keeps_bindings_alive_until_removed() {
        let mut store = HeavyDataStore::new();
        store.insert(Arc::new(InMemoryHandle::from_values("mem:/ids", &[4u64, 5])));
        let mut buffer = DataBuffer::new();
        let handle = store.resolve(" mem:/ids ").unwrap();
        buffer.bind(&handle);
        drop(handle);
        assert_eq!(buffer.read_values::<u64>().unwrap(), vec![4, 5]);

        store.remove("mem:/ids");
        assert!(buffer.is_released());
        assert!(store.is_empty());
    }
}
