//! Descriptor tree nodes
//!
//! Provides [`BenchmarkNode`], one per resolved unique id, wrapping the
//! external benchmark model. Display names and source locators are pure
//! projections of the wrapped model; the node never duplicates model state.
//!
//! Parent links are non-owning (`Weak`) while the parent owns its children,
//! keeping tree ownership a strict forest.

use crate::unique_id::UniqueId;
use mbe_model::{BenchmarkClass, BenchmarkFixture, BenchmarkMethod, ParametrizedBenchmarkMethod, Source};
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};

/// Kind of a descriptor node, identified by its id's last segment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The engine root
    Engine,
    /// A benchmark container backed by a class
    Container,
    /// A plain benchmark method
    Method,
    /// A parametrized benchmark method
    Parametrized,
    /// One concrete parameter combination, a leaf
    Fixture,
}

/// Model payload wrapped by a descriptor node
#[derive(Debug, Clone)]
pub enum NodePayload {
    /// The engine root; the only node without a backing model
    Engine {
        /// Engine display name
        display_name: String,
    },

    /// A benchmark container wrapping an externally-owned class model
    Container(Arc<BenchmarkClass>),

    /// A plain benchmark method
    Method(Arc<BenchmarkMethod>),

    /// A parametrized benchmark method whose children are fixtures
    Parametrized(Arc<ParametrizedBenchmarkMethod>),

    /// One concrete parameter combination
    Fixture {
        /// The parametrized method this fixture belongs to
        method: Arc<BenchmarkMethod>,
        /// The materialized parameter combination
        fixture: BenchmarkFixture,
    },
}

/// A resolved descriptor node
///
/// Created at most once per unique id during a resolution pass and never
/// re-created; children are insertion-ordered and unique by id.
pub struct BenchmarkNode {
    id: UniqueId,
    payload: NodePayload,
    parent: Weak<BenchmarkNode>,
    children: RwLock<Vec<Arc<BenchmarkNode>>>,
}

impl BenchmarkNode {
    pub(crate) fn root(id: UniqueId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            payload: NodePayload::Engine {
                display_name: display_name.into(),
            },
            parent: Weak::new(),
            children: RwLock::new(Vec::new()),
        }
    }

    pub(crate) fn new(id: UniqueId, payload: NodePayload, parent: Weak<BenchmarkNode>) -> Self {
        Self {
            id,
            payload,
            parent,
            children: RwLock::new(Vec::new()),
        }
    }

    pub(crate) fn push_child(&self, child: Arc<BenchmarkNode>) {
        self.children.write().push(child);
    }

    /// Unique id of this node
    #[inline]
    #[must_use]
    pub fn unique_id(&self) -> &UniqueId {
        &self.id
    }

    /// Wrapped model payload
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &NodePayload {
        &self.payload
    }

    /// Node kind
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match &self.payload {
            NodePayload::Engine { .. } => NodeKind::Engine,
            NodePayload::Container(_) => NodeKind::Container,
            NodePayload::Method(_) => NodeKind::Method,
            NodePayload::Parametrized(_) => NodeKind::Parametrized,
            NodePayload::Fixture { .. } => NodeKind::Fixture,
        }
    }

    /// Display name, projected from the wrapped model
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.payload {
            NodePayload::Engine { display_name } => display_name.clone(),
            NodePayload::Container(class) => class.class_name().to_string(),
            NodePayload::Method(method) => method.signature(),
            NodePayload::Parametrized(parametrized) => parametrized.method().signature(),
            NodePayload::Fixture { fixture, .. } => fixture.display_name().to_string(),
        }
    }

    /// Source locator, projected from the wrapped model
    #[must_use]
    pub fn source(&self) -> Option<Source> {
        match &self.payload {
            NodePayload::Engine { .. } => None,
            NodePayload::Container(class) => Some(class.source()),
            NodePayload::Method(method) => Some(method.source()),
            NodePayload::Parametrized(parametrized) => Some(parametrized.method().source()),
            NodePayload::Fixture { method, .. } => Some(method.source()),
        }
    }

    /// Tags, projected from the wrapped model
    ///
    /// Containers carry their class tags; methods and fixtures inherit the
    /// tags of their ancestor container.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        match &self.payload {
            NodePayload::Container(class) => class.tags().to_vec(),
            NodePayload::Engine { .. } => Vec::new(),
            _ => self.parent().map(|parent| parent.tags()).unwrap_or_default(),
        }
    }

    /// Execution mode declared by the underlying method model, if any
    #[must_use]
    pub fn execution_mode_declaration(&self) -> Option<String> {
        let method = match &self.payload {
            NodePayload::Method(method) => method,
            NodePayload::Parametrized(parametrized) => parametrized.method(),
            NodePayload::Fixture { method, .. } => method,
            NodePayload::Engine { .. } | NodePayload::Container(_) => return None,
        };
        method.execution_mode().map(str::to_string)
    }

    /// Parent node, `None` for the engine root
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Arc<BenchmarkNode>> {
        self.parent.upgrade()
    }

    /// Children in insertion order
    #[must_use]
    pub fn children(&self) -> Vec<Arc<BenchmarkNode>> {
        self.children.read().clone()
    }

    /// The wrapped container model, when this is a container node
    #[must_use]
    pub fn as_container(&self) -> Option<&Arc<BenchmarkClass>> {
        match &self.payload {
            NodePayload::Container(class) => Some(class),
            _ => None,
        }
    }

    /// The wrapped parametrized-method model, when this is one
    #[must_use]
    pub fn as_parametrized(&self) -> Option<&Arc<ParametrizedBenchmarkMethod>> {
        match &self.payload {
            NodePayload::Parametrized(parametrized) => Some(parametrized),
            _ => None,
        }
    }
}

impl fmt::Debug for BenchmarkNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkNode")
            .field("id", &self.id.to_string())
            .field("kind", &self.kind())
            .field("children", &self.children.read().len())
            .finish()
    }
}
