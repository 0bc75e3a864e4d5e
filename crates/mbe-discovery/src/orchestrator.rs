//! Resolution orchestrator
//!
//! Drives the fixed-point loop: every pending selector is handed to every
//! resolver in chain order until the pending set stabilizes. Matches may
//! carry expansions whose selectors are merged back into the pending set,
//! deduplicated against everything already seen so the loop terminates even
//! if an external model re-offers an already-seen selector.

use crate::context::ResolutionContext;
use crate::resolver::{ContainerResolver, FixtureResolver, MethodResolver, Resolution, SelectorResolver};
use crate::selector::DiscoverySelector;
use crate::tree::DescriptorTree;
use mbe_model::{
    default_class_predicate, default_method_predicate, BenchmarkUniverse, ClassNameFilter,
    ClassPredicate, MethodPredicate,
};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// One batch of selectors plus the request-scoped class-name filter
#[derive(Debug, Clone)]
pub struct DiscoveryRequest {
    selectors: Vec<DiscoverySelector>,
    class_name_filter: ClassNameFilter,
}

impl DiscoveryRequest {
    /// Create a request accepting every class name
    #[must_use]
    pub fn new(selectors: Vec<DiscoverySelector>) -> Self {
        Self {
            selectors,
            class_name_filter: ClassNameFilter::accept_all(),
        }
    }

    /// Restrict the request to classes passing the given filter
    #[inline]
    #[must_use]
    pub fn with_class_name_filter(mut self, filter: ClassNameFilter) -> Self {
        self.class_name_filter = filter;
        self
    }

    /// The requested selectors
    #[inline]
    #[must_use]
    pub fn selectors(&self) -> &[DiscoverySelector] {
        &self.selectors
    }

    /// The request-scoped class-name filter
    #[inline]
    #[must_use]
    pub fn class_name_filter(&self) -> &ClassNameFilter {
        &self.class_name_filter
    }
}

/// Orchestrator resolving discovery requests against a descriptor tree
///
/// Holds the class universe and the qualifying predicates; the resolver
/// chain itself is rebuilt per request because the container resolver is
/// parameterized with the request's class-name filter.
pub struct DiscoveryOrchestrator {
    universe: Arc<dyn BenchmarkUniverse>,
    container_predicate: ClassPredicate,
    method_predicate: MethodPredicate,
}

impl DiscoveryOrchestrator {
    /// Create an orchestrator with the default qualifying predicates
    #[must_use]
    pub fn new(universe: Arc<dyn BenchmarkUniverse>) -> Self {
        Self {
            universe,
            container_predicate: default_class_predicate(),
            method_predicate: default_method_predicate(),
        }
    }

    /// Create an orchestrator with externally supplied predicates
    #[must_use]
    pub fn with_predicates(
        universe: Arc<dyn BenchmarkUniverse>,
        container_predicate: ClassPredicate,
        method_predicate: MethodPredicate,
    ) -> Self {
        Self {
            universe,
            container_predicate,
            method_predicate,
        }
    }

    /// Resolve a request, growing the tree until the selector set stabilizes
    ///
    /// Unresolved selectors are dropped silently: a selector that does not
    /// describe a benchmark is a normal outcome, not a fault. Termination is
    /// guaranteed because every expansion strictly grows unique-id depth,
    /// declared children are finite, and produced selectors are deduplicated
    /// against everything already seen.
    pub fn resolve(&self, request: &DiscoveryRequest, tree: &DescriptorTree) {
        let resolvers = [
            SelectorResolver::Container(ContainerResolver::new(
                request.class_name_filter().clone(),
                Arc::clone(&self.container_predicate),
                Arc::clone(&self.method_predicate),
            )),
            SelectorResolver::Method(MethodResolver::new(Arc::clone(&self.method_predicate))),
            SelectorResolver::Fixture(FixtureResolver::new()),
        ];
        let mut ctx = ResolutionContext::new(tree, self.universe.as_ref(), &resolvers);

        let mut pending: VecDeque<DiscoverySelector> =
            request.selectors().iter().cloned().collect();
        let mut seen: HashSet<DiscoverySelector> = pending.iter().cloned().collect();

        while let Some(selector) = pending.pop_front() {
            match ctx.run_chain(&selector) {
                Resolution::Unresolved => {
                    trace!(%selector, "selector did not resolve to a benchmark");
                }
                Resolution::Match(matched) => {
                    trace!(%selector, id = %matched.node().unique_id(), "selector resolved");
                    if let Some(expansion) = matched.into_expansion() {
                        for produced in expansion.materialize() {
                            if seen.insert(produced.clone()) {
                                pending.push_back(produced);
                            }
                        }
                    }
                }
            }
        }

        debug!(nodes = tree.len(), "discovery pass complete");
    }
}

impl fmt::Debug for DiscoveryOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveryOrchestrator").finish_non_exhaustive()
    }
}
