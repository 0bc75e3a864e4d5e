//! Method resolver
//!
//! Resolves method selectors and unique-id selectors ending in the `method`
//! segment. The parent container is resolved through the context, then the
//! container's declared children are scanned linearly for the first child
//! whose canonical signature matches — signatures, not bare names,
//! disambiguate overloaded and parametrized forms.

use crate::context::ResolutionContext;
use crate::descriptor::{BenchmarkNode, NodePayload};
use crate::resolver::{fixture, Expansion, Resolution};
use crate::selector::{select_class, select_unique_id, DiscoverySelector};
use crate::unique_id::UniqueId;
use mbe_model::{default_method_predicate, BenchmarkChild, MethodPredicate};
use std::fmt;
use std::sync::Arc;

/// Segment type of method and parametrized-method nodes
pub const SEGMENT_TYPE: &str = "method";

/// Resolver for benchmark methods
pub struct MethodResolver {
    method_predicate: MethodPredicate,
}

impl MethodResolver {
    /// Create a resolver with an externally supplied method predicate
    #[inline]
    #[must_use]
    pub fn new(method_predicate: MethodPredicate) -> Self {
        Self { method_predicate }
    }

    pub(crate) fn resolve(
        &self,
        selector: &DiscoverySelector,
        ctx: &mut ResolutionContext<'_>,
    ) -> Resolution {
        match selector {
            DiscoverySelector::Method {
                class_name,
                signature,
            } => self.resolve_method(class_name, signature, ctx),
            DiscoverySelector::UniqueId(unique_id)
                if unique_id.last_segment().segment_type() == SEGMENT_TYPE =>
            {
                Self::resolve_unique_id(unique_id, ctx)
            }
            _ => Resolution::unresolved(),
        }
    }

    fn resolve_method(
        &self,
        class_name: &str,
        signature: &str,
        ctx: &mut ResolutionContext<'_>,
    ) -> Resolution {
        // check the method qualifies before resolving the parent; a
        // non-benchmark method is a normal unresolved outcome
        let Some(metadata) = ctx.universe().find_class(class_name) else {
            return Resolution::unresolved();
        };
        let qualifies = metadata
            .methods()
            .iter()
            .find(|method| method.signature() == signature)
            .is_some_and(|method| (self.method_predicate)(method));
        if !qualifies {
            return Resolution::unresolved();
        }

        let parent_selector = select_class(class_name);
        match ctx.add_to_parent(&parent_selector, |parent| {
            Self::create_method_node(parent, signature)
        }) {
            Some(node) => Self::to_resolution(node),
            None => Resolution::unresolved(),
        }
    }

    fn resolve_unique_id(unique_id: &UniqueId, ctx: &mut ResolutionContext<'_>) -> Resolution {
        let Ok(parent_id) = unique_id.remove_last() else {
            return Resolution::unresolved();
        };
        let signature = unique_id.last_segment().value().to_string();

        match ctx.add_to_parent(&select_unique_id(parent_id), |parent| {
            Self::create_method_node(parent, &signature)
        }) {
            Some(node) => Self::to_resolution(node),
            None => Resolution::unresolved(),
        }
    }

    /// Locate the first declared child matching the signature and describe
    /// the node wrapping it
    fn create_method_node(
        parent: &Arc<BenchmarkNode>,
        signature: &str,
    ) -> Option<(UniqueId, NodePayload)> {
        let container = parent.as_container()?;
        let child = container
            .children()
            .iter()
            .find(|child| child.signature() == signature)?;

        let id = parent.unique_id().append(SEGMENT_TYPE, child.signature());
        let payload = match child {
            BenchmarkChild::Method(method) => NodePayload::Method(Arc::clone(method)),
            BenchmarkChild::Parametrized(parametrized) => {
                NodePayload::Parametrized(Arc::clone(parametrized))
            }
        };
        Some((id, payload))
    }

    /// A parametrized match expands into one fixture selector per
    /// already-materialized fixture; plain methods carry no expansion
    fn to_resolution(node: Arc<BenchmarkNode>) -> Resolution {
        let expansion = match node.payload() {
            NodePayload::Parametrized(parametrized) => {
                let parametrized = Arc::clone(parametrized);
                let base = node.unique_id().clone();
                Some(Expansion::new(move || {
                    parametrized
                        .fixtures()
                        .iter()
                        .map(|f| {
                            select_unique_id(base.append(fixture::SEGMENT_TYPE, f.display_name()))
                        })
                        .collect()
                }))
            }
            _ => None,
        };
        match expansion {
            Some(expansion) => Resolution::matched_with_expansion(node, expansion),
            None => Resolution::matched(node),
        }
    }
}

impl Default for MethodResolver {
    fn default() -> Self {
        Self::new(default_method_predicate())
    }
}

impl fmt::Debug for MethodResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodResolver").finish_non_exhaustive()
    }
}
