//! Read-only window onto a live map.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use beacon_common::ModelError;
use parking_lot::RwLock;
use tracing::error;

use crate::map::SnapshotMap;

/// Forwards reads to a live, shared map and rejects every mutation.
///
/// Reads observe updates made through the owner as they happen; nothing is
/// copied until [`ReadOnlyView::snapshot`] is called.
pub struct ReadOnlyView<K, V> {
    source: Arc<RwLock<SnapshotMap<K, V>>>,
}

impl<K, V> ReadOnlyView<K, V> {
    pub(crate) fn new(source: Arc<RwLock<SnapshotMap<K, V>>>) -> Self {
        Self { source }
    }

    pub fn len(&self) -> usize {
        self.source.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.read().is_empty()
    }

    /// Run `f` against the live map while holding the read lock.
    ///
    /// Keep `f` short: writers wait until it returns.
    pub fn with<R>(&self, f: impl FnOnce(&SnapshotMap<K, V>) -> R) -> R {
        f(&self.source.read())
    }

    pub fn insert(&self, _key: K, _value: V) -> Result<Option<V>, ModelError> {
        Err(rejected("insert"))
    }

    pub fn remove<Q: ?Sized>(&self, _key: &Q) -> Result<Option<V>, ModelError> {
        Err(rejected("remove"))
    }

    pub fn clear(&self) -> Result<(), ModelError> {
        Err(rejected("clear"))
    }
}

impl<K: Eq + Hash, V> ReadOnlyView<K, V> {
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.source.read().contains_key(key)
    }
}

impl<K: Eq + Hash + Clone, V: Clone> ReadOnlyView<K, V> {
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.source.read().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<K> {
        self.source.read().keys().cloned().collect()
    }

    /// Deep copy of the map as it is right now.
    pub fn snapshot(&self) -> SnapshotMap<K, V> {
        self.source.read().clone()
    }
}

impl<K, V> Clone for ReadOnlyView<K, V> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

fn rejected(operation: &'static str) -> ModelError {
    error!(operation, "attempted to mutate a read-only view");
    ModelError::UnsupportedOperation(operation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared() -> Arc<RwLock<SnapshotMap<String, u32>>> {
        let mut map = SnapshotMap::new();
        map.insert("one".to_string(), 1);
        Arc::new(RwLock::new(map))
    }

    #[test]
    fn forwards_reads() {
        let source = shared();
        let view = ReadOnlyView::new(Arc::clone(&source));
        assert_eq!(view.len(), 1);
        assert!(!view.is_empty());
        assert!(view.contains_key("one"));
        assert_eq!(view.get("one"), Some(1));
        assert_eq!(view.keys(), vec!["one".to_string()]);
        assert_eq!(view.with(|m| m.values().sum::<u32>()), 1);
    }

    #[test]
    fn observes_live_updates() {
        let source = shared();
        let view = ReadOnlyView::new(Arc::clone(&source));
        source.write().insert("two".to_string(), 2);
        assert_eq!(view.len(), 2);
        assert_eq!(view.get("two"), Some(2));
    }

    #[test]
    fn snapshot_does_not_follow_updates() {
        let source = shared();
        let view = ReadOnlyView::new(Arc::clone(&source));
        let snap = view.snapshot();
        source.write().insert("two".to_string(), 2);
        assert_eq!(snap.len(), 1);
    }

    #[test]
    fn rejects_mutation() {
        let source = shared();
        let view = ReadOnlyView::new(Arc::clone(&source));
        assert_eq!(
            view.insert("two".to_string(), 2),
            Err(ModelError::UnsupportedOperation("insert"))
        );
        assert_eq!(
            view.remove("one"),
            Err(ModelError::UnsupportedOperation("remove"))
        );
        assert_eq!(view.clear(), Err(ModelError::UnsupportedOperation("clear")));
        assert_eq!(source.read().len(), 1);
    }
}
