//! Benchmark contexts
//!
//! One [`BenchmarkContext`] per executing descriptor node. Each context owns
//! a store chained to its parent context's store (root contexts chain to the
//! request-level store), exposes scope-addressed store access, and publishes
//! report entries and output directories through the configured listener.
//!
//! Closing a context tears down only the node store; request- and
//! session-level stores are owned by their own lifecycles.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::listener::ReportListener;
use crate::mode::ExecutionMode;
use crate::resources::managed_close_action;
use crate::scopes::{ScopedStore, StoreFacade, StoreScope};
use mbe_discovery::BenchmarkNode;
use mbe_store::{Namespace, NamespacedHierarchicalStore, StoreCloseError};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Execution-time context of one descriptor node
pub struct BenchmarkContext {
    parent: Option<Arc<BenchmarkContext>>,
    node: Arc<BenchmarkNode>,
    config: Arc<EngineConfig>,
    facade: Arc<StoreFacade>,
    listener: Arc<dyn ReportListener>,
    store: Arc<NamespacedHierarchicalStore>,
    tags: Vec<String>,
}

impl BenchmarkContext {
    /// Create the root context of a request
    ///
    /// The root context's store chains to the request-level store.
    #[must_use]
    pub fn root(
        node: Arc<BenchmarkNode>,
        config: Arc<EngineConfig>,
        facade: Arc<StoreFacade>,
        listener: Arc<dyn ReportListener>,
    ) -> Arc<Self> {
        let store = Self::node_store(Arc::clone(facade.request_store()), &config);
        Arc::new(Self {
            parent: None,
            tags: ordered_tags(&node),
            node,
            config,
            facade,
            listener,
            store,
        })
    }

    /// Create a child context for a descendant node
    ///
    /// The child's store chains to this context's store.
    #[must_use]
    pub fn child(self: &Arc<Self>, node: Arc<BenchmarkNode>) -> Arc<Self> {
        let store = Self::node_store(Arc::clone(&self.store), &self.config);
        Arc::new(Self {
            parent: Some(Arc::clone(self)),
            tags: ordered_tags(&node),
            node,
            config: Arc::clone(&self.config),
            facade: Arc::clone(&self.facade),
            listener: Arc::clone(&self.listener),
            store,
        })
    }

    fn node_store(
        parent: Arc<NamespacedHierarchicalStore>,
        config: &EngineConfig,
    ) -> Arc<NamespacedHierarchicalStore> {
        Arc::new(NamespacedHierarchicalStore::with_close_action(
            Some(parent),
            managed_close_action(
                config.auto_close_stored_resources(),
                config.dual_closeable_policy(),
            ),
        ))
    }

    /// The descriptor node this context belongs to
    #[inline]
    #[must_use]
    pub fn node(&self) -> &Arc<BenchmarkNode> {
        &self.node
    }

    /// Parent context, `None` at the root
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<&Arc<BenchmarkContext>> {
        self.parent.as_ref()
    }

    /// The root context of this chain
    #[must_use]
    pub fn root_context(self: &Arc<Self>) -> Arc<Self> {
        match &self.parent {
            Some(parent) => parent.root_context(),
            None => Arc::clone(self),
        }
    }

    /// String form of the node's unique id
    #[must_use]
    pub fn unique_id(&self) -> String {
        self.node.unique_id().to_string()
    }

    /// The node's display name
    #[must_use]
    pub fn display_name(&self) -> String {
        self.node.display_name()
    }

    /// Ordered, de-duplicated tags of the node
    #[inline]
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The engine configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &Arc<EngineConfig> {
        &self.config
    }

    /// This node's own store, bound to a namespace
    #[must_use]
    pub fn store(&self, namespace: Namespace) -> ScopedStore {
        ScopedStore::new(Arc::clone(&self.store), namespace)
    }

    /// A store addressed by explicit scope, bound to a namespace
    #[must_use]
    pub fn store_in_scope(&self, scope: StoreScope, namespace: Namespace) -> ScopedStore {
        match scope {
            StoreScope::LauncherSession => self.facade.session_scoped(namespace),
            StoreScope::ExecutionRequest => self.facade.request_scoped(namespace),
            StoreScope::ExtensionContext => self.store(namespace),
        }
    }

    /// The node's effective execution mode
    ///
    /// A declaration on the underlying method model wins; otherwise the
    /// configured default applies.
    ///
    /// # Errors
    /// [`EngineError::UnknownExecutionMode`] when a declaration carries an
    /// unrecognized value.
    pub fn execution_mode(&self) -> Result<ExecutionMode, EngineError> {
        match self.node.execution_mode_declaration() {
            Some(raw) => raw.parse(),
            None => self.config.default_execution_mode(),
        }
    }

    /// Publish a key/value report entry for this node
    pub fn publish_report_entry(&self, entries: BTreeMap<String, String>) {
        self.listener.report_entry_published(&self.node, &entries);
    }

    /// Publish a directory artifact produced by `action`
    ///
    /// The directory is created inside this node's output directory before
    /// the action runs; afterwards the path must still exist as a directory.
    /// A failure is fatal for this single publish operation only.
    ///
    /// # Errors
    /// [`EngineError::InvalidArtifactName`] when the name would escape the
    /// node's output directory; [`EngineError::OutputDirectory`] on I/O
    /// failure; [`EngineError::PublishFailed`] when the action fails;
    /// [`EngineError::MissingPublishedPath`] when the path is gone after the
    /// action ran.
    pub fn publish_directory(
        &self,
        name: &str,
        action: impl FnOnce(&Path) -> anyhow::Result<()>,
    ) -> Result<PathBuf, EngineError> {
        if !is_single_component(name) {
            return Err(EngineError::InvalidArtifactName(name.to_string()));
        }

        let dir = self
            .config
            .output_directory_provider()
            .create_output_directory(&self.node)?;
        let path = dir.join(name);
        fs::create_dir(&path)?;

        action(&path).map_err(|source| EngineError::PublishFailed {
            name: name.to_string(),
            source,
        })?;

        if !path.is_dir() {
            return Err(EngineError::MissingPublishedPath(
                path.display().to_string(),
            ));
        }
        self.listener.file_entry_published(&self.node, &path);
        Ok(path)
    }

    /// Tear down this context's store
    ///
    /// Invoked after this node and all its descendants finished executing.
    ///
    /// # Errors
    /// [`StoreCloseError`] aggregating every close-action failure.
    pub fn close(&self) -> Result<(), StoreCloseError> {
        debug!(id = %self.node.unique_id(), "closing context store");
        self.store.close()
    }
}

impl fmt::Debug for BenchmarkContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkContext")
            .field("id", &self.node.unique_id().to_string())
            .field("has_parent", &self.parent.is_some())
            .finish_non_exhaustive()
    }
}

/// Tags in first-seen order with duplicates dropped
fn ordered_tags(node: &BenchmarkNode) -> Vec<String> {
    let mut tags = Vec::new();
    for tag in node.tags() {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Whether a name is exactly one normal path component
fn is_single_component(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let mut components = Path::new(name).components();
    let first = components.next();
    components.next().is_none()
        && matches!(first, Some(Component::Normal(component)) if component == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_component_names() {
        assert!(is_single_component("results"));
        assert!(is_single_component("results-1.txt"));
        assert!(!is_single_component(""));
        assert!(!is_single_component("a/b"));
        assert!(!is_single_component("../escape"));
        assert!(!is_single_component("."));
        assert!(!is_single_component("/absolute"));
        assert!(!is_single_component("trailing/"));
    }
}
