//! Store scopes
//!
//! Per-node stores chain to the request-level store, which chains to the
//! session-level store. [`StoreFacade`] hands out the outer scopes;
//! [`ScopedStore`] binds a store to one namespace for convenient access.

use crate::error::EngineError;
use mbe_store::{CloseAction, Namespace, NamespacedHierarchicalStore, StoreError, StoredValue};
use std::sync::Arc;

/// Scope addressing one of the three store levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreScope {
    /// The whole-session store, outliving every request
    LauncherSession,

    /// The whole-request store, outliving every per-node store
    ExecutionRequest,

    /// The store owned by the current context's node
    ExtensionContext,
}

/// Access to the request- and session-level stores
///
/// The request store must be chained to a session store; a parentless
/// request store is a wiring error caught at construction.
#[derive(Debug, Clone)]
pub struct StoreFacade {
    request_store: Arc<NamespacedHierarchicalStore>,
    session_store: Arc<NamespacedHierarchicalStore>,
}

impl StoreFacade {
    /// Create a facade over a request-level store
    ///
    /// # Errors
    /// [`EngineError::MissingSessionStore`] when the request store has no
    /// parent.
    pub fn new(request_store: Arc<NamespacedHierarchicalStore>) -> Result<Self, EngineError> {
        let session_store = request_store
            .parent()
            .cloned()
            .ok_or(EngineError::MissingSessionStore)?;
        Ok(Self {
            request_store,
            session_store,
        })
    }

    /// The request-level store
    #[inline]
    #[must_use]
    pub fn request_store(&self) -> &Arc<NamespacedHierarchicalStore> {
        &self.request_store
    }

    /// The session-level store
    #[inline]
    #[must_use]
    pub fn session_store(&self) -> &Arc<NamespacedHierarchicalStore> {
        &self.session_store
    }

    /// Namespace-bound view of the request-level store
    #[must_use]
    pub fn request_scoped(&self, namespace: Namespace) -> ScopedStore {
        ScopedStore::new(Arc::clone(&self.request_store), namespace)
    }

    /// Namespace-bound view of the session-level store
    #[must_use]
    pub fn session_scoped(&self, namespace: Namespace) -> ScopedStore {
        ScopedStore::new(Arc::clone(&self.session_store), namespace)
    }
}

/// A store bound to one namespace
#[derive(Debug, Clone)]
pub struct ScopedStore {
    store: Arc<NamespacedHierarchicalStore>,
    namespace: Namespace,
}

impl ScopedStore {
    /// Bind a store to a namespace
    #[inline]
    #[must_use]
    pub fn new(store: Arc<NamespacedHierarchicalStore>, namespace: Namespace) -> Self {
        Self { store, namespace }
    }

    /// The bound namespace
    #[inline]
    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Look up a value, falling through ancestor stores
    #[must_use]
    pub fn get(&self, key: &str) -> Option<StoredValue> {
        self.store.get(&self.namespace, key)
    }

    /// Look up a value and downcast it to the requested type
    #[must_use]
    pub fn get_as<T: Send + Sync + 'static>(&self, key: &str) -> Option<Arc<T>> {
        self.store.get_as(&self.namespace, key)
    }

    /// Store a value in the bound namespace
    ///
    /// # Errors
    /// [`StoreError::Closed`] when the underlying store has been closed.
    pub fn put<T: Send + Sync + 'static>(
        &self,
        key: impl Into<String>,
        value: T,
    ) -> Result<Option<StoredValue>, StoreError> {
        self.store.put(self.namespace.clone(), key, value)
    }

    /// Store a value with an entry-level close action
    ///
    /// # Errors
    /// [`StoreError::Closed`] when the underlying store has been closed.
    pub fn put_with_close_action<T: Send + Sync + 'static>(
        &self,
        key: impl Into<String>,
        value: T,
        close_action: CloseAction,
    ) -> Result<Option<StoredValue>, StoreError> {
        self.store
            .put_with_close_action(self.namespace.clone(), key, value, close_action)
    }

    /// Look up or compute a value in the bound namespace
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the underlying store.
    pub fn get_or_compute_if_absent<T, F>(
        &self,
        key: impl Into<String>,
        compute: F,
    ) -> Result<Arc<T>, StoreError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        self.store
            .get_or_compute_if_absent(self.namespace.clone(), key, compute)
    }

    /// Remove a locally stored value from the bound namespace
    ///
    /// # Errors
    /// [`StoreError::Closed`] when the underlying store has been closed.
    pub fn remove(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        self.store.remove(&self.namespace, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chained_stores() -> Arc<NamespacedHierarchicalStore> {
        let session = Arc::new(NamespacedHierarchicalStore::new(None));
        Arc::new(NamespacedHierarchicalStore::new(Some(session)))
    }

    #[test]
    fn facade_requires_a_session_parent() {
        let parentless = Arc::new(NamespacedHierarchicalStore::new(None));
        assert!(matches!(
            StoreFacade::new(parentless),
            Err(EngineError::MissingSessionStore)
        ));
    }

    #[test]
    fn facade_exposes_both_levels() {
        let request = chained_stores();
        let facade = StoreFacade::new(Arc::clone(&request)).unwrap();

        let ns = Namespace::new(["reporting"]);
        facade
            .session_scoped(ns.clone())
            .put("format", "json".to_string())
            .unwrap();

        // visible from the request level through fallthrough
        assert_eq!(
            *facade.request_scoped(ns).get_as::<String>("format").unwrap(),
            "json"
        );
    }

    #[test]
    fn scoped_store_isolates_namespaces() {
        let request = chained_stores();
        let a = ScopedStore::new(Arc::clone(&request), Namespace::new(["a"]));
        let b = ScopedStore::new(request, Namespace::new(["b"]));

        a.put("key", 1_u32).unwrap();

        assert!(b.get("key").is_none());
        assert_eq!(*a.get_as::<u32>("key").unwrap(), 1);
    }
}
