//! Benchmark model
//!
//! The read-only collaborator consumed by the discovery engine. It describes
//! what a benchmark *is* without knowing anything about descriptor trees:
//!
//! - **Metadata**: [`ClassMetadata`] and [`MethodMetadata`], the raw shape of
//!   a candidate class as reported by a [`BenchmarkUniverse`].
//! - **Model**: [`BenchmarkClass`], [`BenchmarkMethod`],
//!   [`ParametrizedBenchmarkMethod`], and [`BenchmarkFixture`], the expanded
//!   descriptor model produced by [`BenchmarkDescriptorFactory`].
//! - **Predicates**: [`IsBenchmarkClass`] and [`IsBenchmarkMethod`], deciding
//!   benchmark-ness, plus alias types for externally supplied predicates.
//! - **Filters**: [`ClassNameFilter`], the per-request name inclusion filter.
//!
//! # Example
//!
//! ```
//! use mbe_model::{BenchmarkDescriptorFactory, ClassMetadata, MethodMetadata};
//!
//! let metadata = ClassMetadata::new("com.acme.Bench")
//!     .with_method(MethodMetadata::benchmark("run", ["com.acme.Bench$State"]));
//! let class = BenchmarkDescriptorFactory::create(&metadata);
//!
//! assert_eq!(class.children().len(), 1);
//! ```

#![warn(missing_docs)]

pub mod factory;
pub mod filter;
pub mod metadata;
pub mod model;
pub mod predicates;
pub mod universe;

// Re-exports
pub use factory::BenchmarkDescriptorFactory;
pub use filter::{ClassNameFilter, FilterError};
pub use metadata::{ClassMetadata, MethodMetadata};
pub use model::{
    BenchmarkChild, BenchmarkClass, BenchmarkFixture, BenchmarkMethod,
    ParametrizedBenchmarkMethod, Source,
};
pub use predicates::{
    default_class_predicate, default_method_predicate, ClassPredicate, IsBenchmarkClass,
    IsBenchmarkMethod, MethodPredicate,
};
pub use universe::BenchmarkUniverse;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
