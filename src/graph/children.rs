//! `ChildCollection<T>`: ordered, shared children with a secondary name key.
//!
//! Index access is authoritative. Names are not required to be unique; name
//! lookup and removal act on the first match. Looking up or removing
//! something that is not there is normal control flow and returns `None`.

use std::slice;
use std::sync::Arc;

/// Element types that expose a search key (`Name`, `Key`).
pub trait Named {
    /// The value name-based lookups compare against.
    fn name(&self) -> &str;
}

/// Ordered collection of shared children.
#[derive(Debug)]
pub struct ChildCollection<T> {
    items: Vec<Arc<T>>,
}

impl<T> Default for ChildCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Clone for ChildCollection<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T> ChildCollection<T> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Child at `index`.
    pub fn get(&self, index: usize) -> Option<&Arc<T>> {
        self.items.get(index)
    }

    /// Mutable access to the child at `index` when this collection is its
    /// only holder.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index).and_then(Arc::get_mut)
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if there are no children.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a child.
    pub fn insert(&mut self, item: Arc<T>) {
        self.items.push(item);
    }

    /// Remove the child at `index`; out-of-range indices are a no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<Arc<T>> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Iterate children in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Arc<T>> {
        self.items.iter()
    }
}

impl<T: Named> ChildCollection<T> {
    /// First child whose name equals `name`.
    pub fn get_by_name(&self, name: &str) -> Option<&Arc<T>> {
        self.items.iter().find(|item| item.name() == name)
    }

    /// Remove the first child whose name equals `name`; no-op if none does.
    pub fn remove_by_name(&mut self, name: &str) -> Option<Arc<T>> {
        let index = self.items.iter().position(|item| item.name() == name)?;
        Some(self.items.remove(index))
    }
}

impl<'a, T> IntoIterator for &'a ChildCollection<T> {
    type Item = &'a Arc<T>;
    type IntoIter = slice::Iter<'a, Arc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<Arc<T>> for ChildCollection<T> {
    fn from_iter<I: IntoIterator<Item = Arc<T>>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<Arc<T>> for ChildCollection<T> {
    fn extend<I: IntoIterator<Item = Arc<T>>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Tagged(&'static str, u32);

    impl Named for Tagged {
        fn name(&self) -> &str {
            self.0
        }
    }

    fn collection(entries: &[(&'static str, u32)]) -> ChildCollection<Tagged> {
        entries
            .iter()
            .map(|&(name, value)| Arc::new(Tagged(name, value)))
            .collect()
    }

    fn values(c: &ChildCollection<Tagged>) -> Vec<u32> {
        c.iter().map(|t| t.1).collect()
    }

    #[test]
    fn name_lookup_returns_first_match() {
        let c = collection(&[("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(c.get_by_name("a").map(|t| t.1), Some(1));
        assert!(c.get_by_name("z").is_none());
        assert_eq!(c.get(2).map(|t| t.1), Some(3));
        assert!(c.get(3).is_none());
    }

    #[test]
    fn removal_preserves_relative_order() {
        let mut c = collection(&[("a", 1), ("b", 2), ("a", 3), ("c", 4)]);
        assert_eq!(c.remove_by_name("a").map(|t| t.1), Some(1));
        assert_eq!(values(&c), vec![2, 3, 4]);
        assert_eq!(c.remove_at(1).map(|t| t.1), Some(3));
        assert_eq!(values(&c), vec![2, 4]);
    }

    #[test]
    fn absent_removal_is_a_no_op() {
        let mut c = collection(&[("a", 1), ("b", 2)]);
        assert!(c.remove_at(5).is_none());
        assert!(c.remove_by_name("q").is_none());
        assert_eq!(values(&c), vec![1, 2]);
    }

    #[test]
    fn get_mut_requires_sole_ownership() {
        let mut c = collection(&[("a", 1)]);
        c.get_mut(0).unwrap().1 = 10;
        let shared = Arc::clone(c.get(0).unwrap());
        assert!(c.get_mut(0).is_none());
        assert_eq!(shared.1, 10);
    }
}
