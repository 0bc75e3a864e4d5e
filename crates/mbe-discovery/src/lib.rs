//! Benchmark discovery engine
//!
//! Turns heterogeneous discovery selectors (by class, by method, by unique
//! id, by package) into a uniquely-addressable tree of benchmark descriptors:
//!
//! - **[`UniqueId`]**: ordered `(type, value)` segments addressing any tree
//!   node, with a lossless `[type:value]` string encoding.
//! - **Descriptor tree**: [`BenchmarkNode`]s wrapping the external benchmark
//!   model, indexed by unique id, with idempotent child insertion.
//! - **Resolvers**: independent units each resolving one selector kind,
//!   chained by the [`DiscoveryOrchestrator`] until the pending selector set
//!   stabilizes.
//!
//! Discovery is a synchronous, single-threaded pass; the finished tree is
//! immutable and safe to consult from concurrent executors.
//!
//! # Example
//!
//! ```
//! use mbe_discovery::{DiscoveryOrchestrator, DiscoveryRequest, DescriptorTree, select_class};
//! use mbe_model::{BenchmarkUniverse, ClassMetadata};
//! use std::sync::Arc;
//!
//! struct Empty;
//! impl BenchmarkUniverse for Empty {
//!     fn find_class(&self, _: &str) -> Option<Arc<ClassMetadata>> { None }
//!     fn scan_package(&self, _: &str) -> Vec<Arc<ClassMetadata>> { Vec::new() }
//! }
//!
//! let orchestrator = DiscoveryOrchestrator::new(Arc::new(Empty));
//! let tree = DescriptorTree::new("microbenchmark-engine", "Microbenchmark Engine");
//! let request = DiscoveryRequest::new(vec![select_class("com.acme.Missing")]);
//!
//! // Unresolvable selectors are dropped silently.
//! orchestrator.resolve(&request, &tree);
//! assert!(tree.root().children().is_empty());
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod descriptor;
pub mod error;
pub mod orchestrator;
pub mod resolver;
pub mod selector;
pub mod tree;
pub mod unique_id;

// Re-exports
pub use context::ResolutionContext;
pub use descriptor::{BenchmarkNode, NodeKind, NodePayload};
pub use error::DiscoveryError;
pub use orchestrator::{DiscoveryOrchestrator, DiscoveryRequest};
pub use resolver::{Expansion, Resolution, ResolvedMatch, SelectorResolver};
pub use selector::{
    select_class, select_method, select_package, select_unique_id, DiscoverySelector,
};
pub use tree::DescriptorTree;
pub use unique_id::{Segment, UniqueId, UniqueIdError, ENGINE_SEGMENT_TYPE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
