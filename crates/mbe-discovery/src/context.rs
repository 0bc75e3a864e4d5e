//! Resolution context
//!
//! Mediates between resolvers and the growing tree so that a parent is
//! constructed at most once per unique id per resolution pass, no matter how
//! many resolvers or selectors reference it. Resolvers never touch the tree
//! directly; every insertion goes through [`ResolutionContext`].

use crate::descriptor::{BenchmarkNode, NodePayload};
use crate::resolver::{Resolution, SelectorResolver};
use crate::selector::DiscoverySelector;
use crate::tree::DescriptorTree;
use crate::unique_id::UniqueId;
use mbe_model::BenchmarkUniverse;
use std::sync::Arc;
use tracing::error;

/// Per-pass resolution state handed to every resolver
pub struct ResolutionContext<'a> {
    tree: &'a DescriptorTree,
    universe: &'a dyn BenchmarkUniverse,
    resolvers: &'a [SelectorResolver],
}

impl<'a> ResolutionContext<'a> {
    pub(crate) fn new(
        tree: &'a DescriptorTree,
        universe: &'a dyn BenchmarkUniverse,
        resolvers: &'a [SelectorResolver],
    ) -> Self {
        Self {
            tree,
            universe,
            resolvers,
        }
    }

    /// The tree under construction
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &DescriptorTree {
        self.tree
    }

    /// The class universe backing this pass
    #[inline]
    #[must_use]
    pub fn universe(&self) -> &dyn BenchmarkUniverse {
        self.universe
    }

    /// Create a node directly under the engine root
    ///
    /// The factory describes the child for the given parent; `None` means
    /// the child cannot be produced and the caller reports unresolved.
    pub fn add_to_engine(
        &mut self,
        factory: impl FnOnce(&Arc<BenchmarkNode>) -> Option<(UniqueId, NodePayload)>,
    ) -> Option<Arc<BenchmarkNode>> {
        let root = Arc::clone(self.tree.root());
        self.insert(&root, factory)
    }

    /// Resolve a parent selector, then create a node under the parent
    ///
    /// The parent is resolved through the full resolver chain, recursively;
    /// if it cannot be resolved no partial node is created and `None` is
    /// returned.
    pub fn add_to_parent(
        &mut self,
        parent_selector: &DiscoverySelector,
        factory: impl FnOnce(&Arc<BenchmarkNode>) -> Option<(UniqueId, NodePayload)>,
    ) -> Option<Arc<BenchmarkNode>> {
        let parent = self.resolve(parent_selector)?;
        self.insert(&parent, factory)
    }

    /// Resolve a selector to a node, memoized by target unique id
    ///
    /// An already-resolved node satisfies a unique-id selector without
    /// re-running the resolver chain; this is what makes a class reached via
    /// a class selector and later via a unique-id selector converge on the
    /// same node. Any expansion produced along the way is dropped
    /// unevaluated: resolving a parent never enumerates its children.
    pub fn resolve(&mut self, selector: &DiscoverySelector) -> Option<Arc<BenchmarkNode>> {
        if let DiscoverySelector::UniqueId(unique_id) = selector {
            if let Some(existing) = self.tree.find_by_unique_id(unique_id) {
                return Some(existing);
            }
        }
        match self.run_chain(selector) {
            Resolution::Match(matched) => Some(matched.into_node()),
            Resolution::Unresolved => None,
        }
    }

    /// Hand a selector to each resolver in chain order until one matches
    pub(crate) fn run_chain(&mut self, selector: &DiscoverySelector) -> Resolution {
        let resolvers = self.resolvers;
        for resolver in resolvers {
            let resolution = resolver.resolve(selector, self);
            if !resolution.is_unresolved() {
                return resolution;
            }
        }
        Resolution::Unresolved
    }

    fn insert(
        &mut self,
        parent: &Arc<BenchmarkNode>,
        factory: impl FnOnce(&Arc<BenchmarkNode>) -> Option<(UniqueId, NodePayload)>,
    ) -> Option<Arc<BenchmarkNode>> {
        let (id, payload) = factory(parent)?;
        match self.tree.insert_child(parent, id, payload) {
            Ok(node) => Some(node),
            Err(err) => {
                // a resolver violated the prefix invariant; drop the node
                // rather than corrupting the tree
                error!(error = %err, "resolver produced an invalid child id");
                None
            }
        }
    }
}
