//! Descriptor tree
//!
//! Provides [`DescriptorTree`], the single-rooted, acyclic tree of resolved
//! descriptor nodes with an id index for O(1) lookup.

use crate::descriptor::{BenchmarkNode, NodePayload};
use crate::error::DiscoveryError;
use crate::unique_id::UniqueId;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

/// Tree of descriptor nodes, addressable by unique id
///
/// Insertion happens during the single-threaded discovery pass; afterwards
/// the tree is immutable and safe to consult from concurrent executors.
pub struct DescriptorTree {
    root: Arc<BenchmarkNode>,
    index: DashMap<UniqueId, Arc<BenchmarkNode>>,
}

impl DescriptorTree {
    /// Create a tree holding only the engine root
    #[must_use]
    pub fn new(engine_id: &str, display_name: &str) -> Self {
        let id = UniqueId::for_engine(engine_id);
        let root = Arc::new(BenchmarkNode::root(id.clone(), display_name));
        let index = DashMap::new();
        index.insert(id, Arc::clone(&root));
        Self { root, index }
    }

    /// The engine root
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Arc<BenchmarkNode> {
        &self.root
    }

    /// Look up a node by unique id
    #[must_use]
    pub fn find_by_unique_id(&self, id: &UniqueId) -> Option<Arc<BenchmarkNode>> {
        self.index.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Number of nodes, engine root included
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the tree holds only the engine root
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Insert a child under a parent, idempotently
    ///
    /// Inserting an id that already exists is a no-op returning the existing
    /// node — this is the memoization guarantee that makes parent
    /// construction happen at most once per unique id per pass.
    ///
    /// # Errors
    /// [`DiscoveryError::IdPrefixMismatch`] when the child id is not the
    /// parent id plus exactly one segment.
    pub fn insert_child(
        &self,
        parent: &Arc<BenchmarkNode>,
        id: UniqueId,
        payload: NodePayload,
    ) -> Result<Arc<BenchmarkNode>, DiscoveryError> {
        let valid_prefix = id
            .remove_last()
            .map(|prefix| &prefix == parent.unique_id())
            .unwrap_or(false);
        if !valid_prefix {
            return Err(DiscoveryError::IdPrefixMismatch {
                child: id,
                parent: parent.unique_id().clone(),
            });
        }

        if let Some(existing) = self.find_by_unique_id(&id) {
            return Ok(existing);
        }

        let node = Arc::new(BenchmarkNode::new(
            id.clone(),
            payload,
            Arc::downgrade(parent),
        ));
        parent.push_child(Arc::clone(&node));
        self.index.insert(id, Arc::clone(&node));
        Ok(node)
    }
}

impl fmt::Debug for DescriptorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorTree")
            .field("root", &self.root.unique_id().to_string())
            .field("nodes", &self.index.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mbe_model::{BenchmarkDescriptorFactory, ClassMetadata, MethodMetadata};

    fn container_payload(class_name: &str) -> NodePayload {
        let metadata = ClassMetadata::new(class_name)
            .with_method(MethodMetadata::benchmark("run", Vec::<String>::new()));
        NodePayload::Container(Arc::new(BenchmarkDescriptorFactory::create(&metadata)))
    }

    #[test]
    fn new_tree_holds_only_the_root() {
        let tree = DescriptorTree::new("e", "Engine");
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 1);
        assert_eq!(
            tree.find_by_unique_id(&UniqueId::for_engine("e"))
                .unwrap()
                .unique_id(),
            tree.root().unique_id()
        );
    }

    #[test]
    fn insert_child_links_parent_and_index() {
        let tree = DescriptorTree::new("e", "Engine");
        let id = tree.root().unique_id().append("class", "com.acme.Bench");

        let node = tree
            .insert_child(tree.root(), id.clone(), container_payload("com.acme.Bench"))
            .unwrap();

        assert_eq!(node.parent().unwrap().unique_id(), tree.root().unique_id());
        assert_eq!(tree.root().children().len(), 1);
        assert!(tree.find_by_unique_id(&id).is_some());
    }

    #[test]
    fn insert_child_is_idempotent() {
        let tree = DescriptorTree::new("e", "Engine");
        let id = tree.root().unique_id().append("class", "com.acme.Bench");

        let first = tree
            .insert_child(tree.root(), id.clone(), container_payload("com.acme.Bench"))
            .unwrap();
        let second = tree
            .insert_child(tree.root(), id, container_payload("com.acme.Bench"))
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(tree.root().children().len(), 1);
    }

    #[test]
    fn insert_child_rejects_non_prefix_ids() {
        let tree = DescriptorTree::new("e", "Engine");
        let stray = UniqueId::for_engine("other").append("class", "com.acme.Bench");

        let result = tree.insert_child(tree.root(), stray, container_payload("com.acme.Bench"));
        assert!(matches!(
            result,
            Err(DiscoveryError::IdPrefixMismatch { .. })
        ));
    }

    #[test]
    fn insert_child_rejects_root_depth_ids() {
        let tree = DescriptorTree::new("e", "Engine");
        let too_short = UniqueId::for_engine("e");

        let result =
            tree.insert_child(tree.root(), too_short, container_payload("com.acme.Bench"));
        assert!(matches!(
            result,
            Err(DiscoveryError::IdPrefixMismatch { .. })
        ));
    }
}
