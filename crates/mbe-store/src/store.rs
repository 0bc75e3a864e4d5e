//! Hierarchical namespaced key/value store
//!
//! Provides [`NamespacedHierarchicalStore`], one per descriptor node, chained
//! to the parent node's store for read fallthrough.

use crate::error::{StoreCloseError, StoreError};
use crate::namespace::Namespace;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Type-erased stored value
pub type StoredValue = Arc<dyn Any + Send + Sync>;

/// Teardown action invoked for a stored entry when its store closes
pub type CloseAction =
    Arc<dyn Fn(&Namespace, &str, &StoredValue) -> anyhow::Result<()> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CompositeKey {
    namespace: Namespace,
    key: String,
}

struct StoredEntry {
    value: StoredValue,
    close_action: Option<CloseAction>,
}

#[derive(Default)]
struct StoreState {
    entries: IndexMap<CompositeKey, StoredEntry>,
    closed: bool,
}

/// Namespaced key/value store chained to an optional parent store
///
/// Reads fall through the parent chain on miss; writes always land locally,
/// so sibling stores never observe each other's entries except through a
/// common ancestor. All operations are thread-safe; racing
/// [`get_or_compute_if_absent`](Self::get_or_compute_if_absent) calls on one
/// (namespace, key) pair admit exactly one winner.
///
/// A store's lifetime is owned by the tree node it is attached to. Closing a
/// store invokes each entry's close action (the entry-level action when
/// present, otherwise the store-level action configured at construction) in
/// reverse insertion order, aggregating failures rather than aborting.
pub struct NamespacedHierarchicalStore {
    parent: Option<Arc<NamespacedHierarchicalStore>>,
    default_close_action: Option<CloseAction>,
    inner: Mutex<StoreState>,
}

impl NamespacedHierarchicalStore {
    /// Create a store chained to an optional parent
    #[inline]
    #[must_use]
    pub fn new(parent: Option<Arc<NamespacedHierarchicalStore>>) -> Self {
        Self {
            parent,
            default_close_action: None,
            inner: Mutex::new(StoreState::default()),
        }
    }

    /// Create a store with a store-level close action
    ///
    /// The action applies to every entry that does not carry its own.
    #[inline]
    #[must_use]
    pub fn with_close_action(
        parent: Option<Arc<NamespacedHierarchicalStore>>,
        close_action: CloseAction,
    ) -> Self {
        Self {
            parent,
            default_close_action: Some(close_action),
            inner: Mutex::new(StoreState::default()),
        }
    }

    /// Parent store, if any
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<&Arc<NamespacedHierarchicalStore>> {
        self.parent.as_ref()
    }

    /// Whether this store has been closed
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// Number of locally stored entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Whether this store holds no local entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a value, falling through the parent chain on miss
    #[must_use]
    pub fn get(&self, namespace: &Namespace, key: &str) -> Option<StoredValue> {
        let composite = CompositeKey {
            namespace: namespace.clone(),
            key: key.to_string(),
        };
        {
            let state = self.inner.lock();
            if let Some(entry) = state.entries.get(&composite) {
                return Some(Arc::clone(&entry.value));
            }
        }
        self.parent.as_ref()?.get(namespace, key)
    }

    /// Look up a value and downcast it to the requested type
    ///
    /// Returns `None` both on miss and when the stored value has a different
    /// type; use [`get`](Self::get) to distinguish the two.
    #[must_use]
    pub fn get_as<T: Send + Sync + 'static>(
        &self,
        namespace: &Namespace,
        key: &str,
    ) -> Option<Arc<T>> {
        self.get(namespace, key)?.downcast::<T>().ok()
    }

    /// Store a value locally, returning the previously stored local value
    ///
    /// Re-storing under an existing (namespace, key) re-registers the entry
    /// at the most recent teardown position.
    ///
    /// # Errors
    /// [`StoreError::Closed`] when the store has been closed.
    pub fn put<T: Send + Sync + 'static>(
        &self,
        namespace: Namespace,
        key: impl Into<String>,
        value: T,
    ) -> Result<Option<StoredValue>, StoreError> {
        self.put_entry(namespace, key.into(), Arc::new(value), None)
    }

    /// Store a value with an entry-level close action
    ///
    /// # Errors
    /// [`StoreError::Closed`] when the store has been closed.
    pub fn put_with_close_action<T: Send + Sync + 'static>(
        &self,
        namespace: Namespace,
        key: impl Into<String>,
        value: T,
        close_action: CloseAction,
    ) -> Result<Option<StoredValue>, StoreError> {
        self.put_entry(namespace, key.into(), Arc::new(value), Some(close_action))
    }

    fn put_entry(
        &self,
        namespace: Namespace,
        key: String,
        value: StoredValue,
        close_action: Option<CloseAction>,
    ) -> Result<Option<StoredValue>, StoreError> {
        let mut state = self.inner.lock();
        if state.closed {
            return Err(StoreError::Closed);
        }
        let composite = CompositeKey { namespace, key };
        let previous = state
            .entries
            .shift_remove(&composite)
            .map(|entry| entry.value);
        state.entries.insert(
            composite,
            StoredEntry {
                value,
                close_action,
            },
        );
        Ok(previous)
    }

    /// Look up a value or compute and store it locally if absent everywhere
    ///
    /// A value visible through an ancestor satisfies the lookup without a
    /// local write. Racing computations for one (namespace, key) pair are
    /// serialized; exactly one compute closure runs.
    ///
    /// # Errors
    /// [`StoreError::Closed`] when a write would be required on a closed
    /// store; [`StoreError::TypeMismatch`] when the stored value has a
    /// different type.
    pub fn get_or_compute_if_absent<T, F>(
        &self,
        namespace: Namespace,
        key: impl Into<String>,
        compute: F,
    ) -> Result<Arc<T>, StoreError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        let key = key.into();
        let mismatch = |namespace: &Namespace, key: &str| StoreError::TypeMismatch {
            namespace: namespace.clone(),
            key: key.to_string(),
        };

        if let Some(existing) = self.get(&namespace, &key) {
            return existing
                .downcast::<T>()
                .map_err(|_| mismatch(&namespace, &key));
        }

        let mut state = self.inner.lock();
        if state.closed {
            return Err(StoreError::Closed);
        }
        let composite = CompositeKey {
            namespace: namespace.clone(),
            key: key.clone(),
        };
        if let Some(entry) = state.entries.get(&composite) {
            return Arc::clone(&entry.value)
                .downcast::<T>()
                .map_err(|_| mismatch(&namespace, &key));
        }
        let value = Arc::new(compute());
        state.entries.insert(
            composite,
            StoredEntry {
                value: Arc::clone(&value) as StoredValue,
                close_action: None,
            },
        );
        Ok(value)
    }

    /// Remove a locally stored value
    ///
    /// Ancestors are never affected; removing a shadowing entry uncovers the
    /// ancestor value again.
    ///
    /// # Errors
    /// [`StoreError::Closed`] when the store has been closed.
    pub fn remove(
        &self,
        namespace: &Namespace,
        key: &str,
    ) -> Result<Option<StoredValue>, StoreError> {
        let mut state = self.inner.lock();
        if state.closed {
            return Err(StoreError::Closed);
        }
        let composite = CompositeKey {
            namespace: namespace.clone(),
            key: key.to_string(),
        };
        Ok(state.entries.shift_remove(&composite).map(|entry| entry.value))
    }

    /// Close this store, tearing down local entries
    ///
    /// Entries are torn down in reverse insertion order; each entry's close
    /// action is invoked exactly once. A failing action never prevents the
    /// remaining entries from being attempted. Parent stores are untouched.
    /// Closing an already-closed store is a no-op.
    ///
    /// # Errors
    /// [`StoreCloseError`] aggregating every close-action failure, raised
    /// only after all entries were attempted.
    pub fn close(&self) -> Result<(), StoreCloseError> {
        let drained: Vec<(CompositeKey, StoredEntry)> = {
            let mut state = self.inner.lock();
            if state.closed {
                return Ok(());
            }
            state.closed = true;
            state.entries.drain(..).collect()
        };

        let mut failures = Vec::new();
        for (composite, entry) in drained.into_iter().rev() {
            let action = entry
                .close_action
                .or_else(|| self.default_close_action.clone());
            let Some(action) = action else { continue };
            if let Err(error) = action(&composite.namespace, &composite.key, &entry.value) {
                warn!(
                    namespace = %composite.namespace,
                    key = %composite.key,
                    %error,
                    "close action failed; continuing teardown"
                );
                failures.push(error);
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(StoreCloseError::new(failures))
        }
    }
}

impl fmt::Debug for NamespacedHierarchicalStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("NamespacedHierarchicalStore")
            .field("entries", &state.entries.len())
            .field("closed", &state.closed)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
