//! Observable selection store.
//!
//! `SelectionStore<K>` owns the set of selected item keys and notifies
//! subscribers after every mutation that changed membership. Snapshots are
//! immutable `Arc`s: a reader holding one can compare it against a later
//! snapshot with [`Arc::ptr_eq`] to detect changes without diffing.
//!
//! # Example
//!
//! ```
//! use tendril::SelectionStore;
//!
//! let store: SelectionStore<&str> = SelectionStore::new();
//! let before = store.snapshot();
//! store.toggle("fern");
//! assert!(store.contains(&"fern"));
//! assert!(!std::sync::Arc::ptr_eq(&before, &store.snapshot()));
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Unique, stable identifier of one list entry.
///
/// Blanket-implemented for every key type the store can hold.
pub trait ItemKey: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> ItemKey for T where T: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// The set of currently selected keys.
pub type SelectionSet<K> = HashSet<K>;

type Listener = Arc<dyn Fn() + Send + Sync>;

struct StoreInner<K> {
    snapshot: Arc<SelectionSet<K>>,
    listeners: BTreeMap<u64, Listener>,
    next_listener: u64,
}

impl<K> fmt::Debug for StoreInner<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreInner")
            .field("snapshot", &self.snapshot)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Shared handle to a selection.
///
/// Cloning is cheap and every clone observes the same selection.
#[derive(Debug)]
pub struct SelectionStore<K> {
    inner: Arc<RwLock<StoreInner<K>>>,
}

impl<K: ItemKey> SelectionStore<K> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_selection(SelectionSet::new())
    }

    /// Create a store with an initial selection.
    pub fn with_selection(selection: SelectionSet<K>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                snapshot: Arc::new(selection),
                listeners: BTreeMap::new(),
                next_listener: 0,
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner<K>> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner<K>> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // -------------------------------------------------------------------------
    // Observation
    // -------------------------------------------------------------------------

    /// Register a callback invoked after every change.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or [`Subscription::unsubscribe`] is called.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut guard = self.write();
        let id = guard.next_listener;
        guard.next_listener += 1;
        guard.listeners.insert(id, Arc::new(listener));

        let inner = Arc::clone(&self.inner);
        Subscription {
            remove: Some(Box::new(move || {
                let mut guard = inner.write().unwrap_or_else(|p| p.into_inner());
                guard.listeners.remove(&id);
            })),
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.read().listeners.len()
    }

    /// The current selection.
    ///
    /// The returned `Arc` only changes identity when membership changes.
    pub fn snapshot(&self) -> Arc<SelectionSet<K>> {
        Arc::clone(&self.read().snapshot)
    }

    /// Whether `key` is selected.
    pub fn contains(&self, key: &K) -> bool {
        self.read().snapshot.contains(key)
    }

    /// Number of selected keys.
    pub fn len(&self) -> usize {
        self.read().snapshot.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.read().snapshot.is_empty()
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Add the key if absent, remove it if present. Always notifies.
    pub fn toggle(&self, key: K) {
        let listeners = {
            let mut guard = self.write();
            let mut next = SelectionSet::clone(&guard.snapshot);
            if !next.remove(&key) {
                next.insert(key);
            }
            guard.snapshot = Arc::new(next);
            Self::collect_listeners(&guard)
        };
        Self::notify(listeners);
    }

    /// Replace the selection wholesale.
    ///
    /// Nothing happens if `next` has the same members as the current
    /// selection. Returns whether the selection changed.
    pub fn replace(&self, next: SelectionSet<K>) -> bool {
        let listeners = {
            let mut guard = self.write();
            if same_members(&guard.snapshot, &next) {
                return false;
            }
            guard.snapshot = Arc::new(next);
            Self::collect_listeners(&guard)
        };
        Self::notify(listeners);
        true
    }

    /// Remove every given key that is currently selected.
    ///
    /// Notifies only if at least one key was removed.
    pub fn bulk_unselect<'a, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'a K>,
    {
        let current = self.snapshot();
        let mut next: Option<SelectionSet<K>> = None;
        for key in keys {
            if current.contains(key) {
                next.get_or_insert_with(|| SelectionSet::clone(&current))
                    .remove(key);
            }
        }
        match next {
            Some(next) => self.replace(next),
            None => false,
        }
    }

    /// Select every given key. Notifies only if membership changed.
    pub fn select_all<'a, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'a K>,
    {
        let mut next = SelectionSet::clone(&self.snapshot());
        next.extend(keys.into_iter().cloned());
        self.replace(next)
    }

    /// Unselect everything. Notifies only if the selection was non-empty.
    pub fn clear(&self) -> bool {
        self.replace(SelectionSet::new())
    }

    /// Keep only the keys matching the predicate.
    pub fn retain<F>(&self, mut keep: F) -> bool
    where
        F: FnMut(&K) -> bool,
    {
        let current = self.snapshot();
        let next: SelectionSet<K> = current.iter().filter(|k| keep(k)).cloned().collect();
        self.replace(next)
    }

    fn collect_listeners(guard: &StoreInner<K>) -> Vec<Listener> {
        guard.listeners.values().cloned().collect()
    }

    // Runs with the lock released so listeners may read the store.
    fn notify(listeners: Vec<Listener>) {
        for listener in listeners {
            listener();
        }
    }
}

impl<K> Clone for SelectionStore<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: ItemKey> Default for SelectionStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Symmetric-difference check without allocating.
fn same_members<K: ItemKey>(a: &SelectionSet<K>, b: &SelectionSet<K>) -> bool {
    a.len() == b.len() && a.iter().all(|key| b.contains(key))
}

/// Registration handle returned by [`SelectionStore::subscribe`].
#[must_use = "dropping a Subscription unregisters the listener"]
pub struct Subscription {
    remove: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Unregister the listener.
    pub fn unsubscribe(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.remove.is_some())
            .finish()
    }
}
