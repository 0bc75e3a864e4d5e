//! Container resolver
//!
//! Resolves class selectors, unique-id selectors ending in the `class`
//! segment, and package selectors. Containers are classes that satisfy the
//! externally supplied container predicate; a class that fails the predicate
//! yields `Unresolved`, not an error.

use crate::context::ResolutionContext;
use crate::descriptor::NodePayload;
use crate::resolver::{Expansion, Resolution};
use crate::selector::{select_class, select_method, DiscoverySelector};
use mbe_model::{
    BenchmarkDescriptorFactory, ClassMetadata, ClassNameFilter, ClassPredicate, MethodPredicate,
};
use std::fmt;
use std::sync::Arc;

/// Segment type of container nodes
pub const SEGMENT_TYPE: &str = "class";

/// Resolver for benchmark containers
///
/// Parameterized per discovery request with the request's class-name filter;
/// the qualifying predicates are externally supplied.
pub struct ContainerResolver {
    class_name_filter: ClassNameFilter,
    container_predicate: ClassPredicate,
    method_predicate: MethodPredicate,
}

impl ContainerResolver {
    /// Create a resolver for one discovery request
    #[must_use]
    pub fn new(
        class_name_filter: ClassNameFilter,
        container_predicate: ClassPredicate,
        method_predicate: MethodPredicate,
    ) -> Self {
        Self {
            class_name_filter,
            container_predicate,
            method_predicate,
        }
    }

    pub(crate) fn resolve(
        &self,
        selector: &DiscoverySelector,
        ctx: &mut ResolutionContext<'_>,
    ) -> Resolution {
        match selector {
            DiscoverySelector::Class { class_name } => {
                if !self.class_name_filter.matches(class_name) {
                    return Resolution::unresolved();
                }
                match ctx.universe().find_class(class_name) {
                    Some(metadata) => self.resolve_class(&metadata, ctx),
                    None => Resolution::unresolved(),
                }
            }
            DiscoverySelector::UniqueId(unique_id)
                if unique_id.last_segment().segment_type() == SEGMENT_TYPE =>
            {
                // the unique-id route addresses one specific class; the
                // request's name filter does not apply here
                match ctx.universe().find_class(unique_id.last_segment().value()) {
                    Some(metadata) => self.resolve_class(&metadata, ctx),
                    None => Resolution::unresolved(),
                }
            }
            DiscoverySelector::Package { package_name } => self.resolve_package(package_name, ctx),
            _ => Resolution::unresolved(),
        }
    }

    fn resolve_class(
        &self,
        metadata: &Arc<ClassMetadata>,
        ctx: &mut ResolutionContext<'_>,
    ) -> Resolution {
        if !(self.container_predicate)(metadata) {
            return Resolution::unresolved();
        }

        let Some(node) = ctx.add_to_engine(|root| {
            let id = root.unique_id().append(SEGMENT_TYPE, metadata.class_name());
            let model = BenchmarkDescriptorFactory::create(metadata);
            Some((id, NodePayload::Container(Arc::new(model))))
        }) else {
            return Resolution::unresolved();
        };

        // one method selector per qualifying method, in declared (top-down)
        // order; produced lazily so unique-id-scoped requests never walk the
        // full method set
        let metadata = Arc::clone(metadata);
        let method_predicate = Arc::clone(&self.method_predicate);
        let expansion = Expansion::new(move || {
            metadata
                .methods()
                .iter()
                .filter(|method| method_predicate(method))
                .map(|method| select_method(metadata.class_name(), method.signature()))
                .collect()
        });
        Resolution::matched_with_expansion(node, expansion)
    }

    fn resolve_package(&self, package_name: &str, ctx: &mut ResolutionContext<'_>) -> Resolution {
        let selectors: Vec<DiscoverySelector> = ctx
            .universe()
            .scan_package(package_name)
            .iter()
            .filter(|metadata| self.class_name_filter.matches(metadata.class_name()))
            .map(|metadata| select_class(metadata.class_name()))
            .collect();

        if selectors.is_empty() {
            return Resolution::unresolved();
        }

        // package selectors resolve to the engine root; the classes they
        // cover arrive through the expansion
        let root = Arc::clone(ctx.tree().root());
        Resolution::matched_with_expansion(root, Expansion::new(move || selectors))
    }
}

impl fmt::Debug for ContainerResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerResolver")
            .field("class_name_filter", &self.class_name_filter)
            .finish_non_exhaustive()
    }
}
