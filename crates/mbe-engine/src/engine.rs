//! Engine facade
//!
//! [`MicrobenchmarkEngine`] owns the discovery orchestrator and resolves
//! discovery requests into descriptor trees rooted at the engine descriptor.

use mbe_discovery::{DescriptorTree, DiscoveryOrchestrator, DiscoveryRequest};
use mbe_model::{BenchmarkUniverse, ClassPredicate, MethodPredicate};
use std::fmt;
use std::sync::Arc;

/// Engine id, the value of the root unique-id segment
pub const ENGINE_ID: &str = "microbenchmark-engine";

/// Display name of the engine descriptor
pub const ENGINE_DISPLAY_NAME: &str = "Microbenchmark Engine";

/// Discovery entry point of the engine
pub struct MicrobenchmarkEngine {
    orchestrator: DiscoveryOrchestrator,
}

impl MicrobenchmarkEngine {
    /// Create an engine over a class universe with default predicates
    #[must_use]
    pub fn new(universe: Arc<dyn BenchmarkUniverse>) -> Self {
        Self {
            orchestrator: DiscoveryOrchestrator::new(universe),
        }
    }

    /// Create an engine with externally supplied qualifying predicates
    #[must_use]
    pub fn with_predicates(
        universe: Arc<dyn BenchmarkUniverse>,
        container_predicate: ClassPredicate,
        method_predicate: MethodPredicate,
    ) -> Self {
        Self {
            orchestrator: DiscoveryOrchestrator::with_predicates(
                universe,
                container_predicate,
                method_predicate,
            ),
        }
    }

    /// Resolve a discovery request into a finished descriptor tree
    ///
    /// Discovery completes fully before execution begins; the returned tree
    /// is immutable and addressable by unique id.
    #[must_use]
    pub fn discover(&self, request: &DiscoveryRequest) -> DescriptorTree {
        let tree = DescriptorTree::new(ENGINE_ID, ENGINE_DISPLAY_NAME);
        self.orchestrator.resolve(request, &tree);
        tree
    }
}

impl fmt::Debug for MicrobenchmarkEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MicrobenchmarkEngine").finish_non_exhaustive()
    }
}
