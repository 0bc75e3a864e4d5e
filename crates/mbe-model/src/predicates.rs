//! Benchmark-qualifying predicates
//!
//! [`IsBenchmarkClass`] and [`IsBenchmarkMethod`] decide benchmark-ness; the
//! discovery engine consumes them through the [`ClassPredicate`] and
//! [`MethodPredicate`] aliases so callers can substitute their own rules per
//! discovery request.

use crate::metadata::{ClassMetadata, MethodMetadata};
use std::sync::Arc;

/// Externally supplied container-qualifying predicate
pub type ClassPredicate = Arc<dyn Fn(&ClassMetadata) -> bool + Send + Sync>;

/// Externally supplied method-qualifying predicate
pub type MethodPredicate = Arc<dyn Fn(&MethodMetadata) -> bool + Send + Sync>;

/// Predicate deciding whether a class is a benchmark container
///
/// A class qualifies when at least one of its declared methods qualifies
/// under [`IsBenchmarkMethod`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IsBenchmarkClass;

impl IsBenchmarkClass {
    /// Test a class
    #[must_use]
    pub fn test(&self, class: &ClassMetadata) -> bool {
        class.methods().iter().any(|m| IsBenchmarkMethod.test(m))
    }
}

/// Predicate deciding whether a method is a benchmark
#[derive(Debug, Clone, Copy, Default)]
pub struct IsBenchmarkMethod;

impl IsBenchmarkMethod {
    /// Test a method
    #[inline]
    #[must_use]
    pub fn test(&self, method: &MethodMetadata) -> bool {
        method.is_benchmark()
    }
}

/// Default container predicate backed by [`IsBenchmarkClass`]
#[must_use]
pub fn default_class_predicate() -> ClassPredicate {
    Arc::new(|class| IsBenchmarkClass.test(class))
}

/// Default method predicate backed by [`IsBenchmarkMethod`]
#[must_use]
pub fn default_method_predicate() -> MethodPredicate {
    Arc::new(|method| IsBenchmarkMethod.test(method))
}
