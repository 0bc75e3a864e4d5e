//! Container-to-descriptor factory
//!
//! [`BenchmarkDescriptorFactory`] expands [`ClassMetadata`] into the
//! [`BenchmarkClass`] model consumed by the descriptor tree.

use crate::metadata::ClassMetadata;
use crate::model::{BenchmarkChild, BenchmarkClass, BenchmarkMethod, ParametrizedBenchmarkMethod};
use crate::predicates::IsBenchmarkMethod;
use std::sync::Arc;

/// Factory expanding class metadata into the benchmark container model
#[derive(Debug, Clone, Copy, Default)]
pub struct BenchmarkDescriptorFactory;

impl BenchmarkDescriptorFactory {
    /// Expand a class into its container model
    ///
    /// Only benchmark-qualifying methods become children; declaration order
    /// is preserved. Methods with materialized fixtures become parametrized
    /// children, the rest plain method children.
    #[must_use]
    pub fn create(metadata: &ClassMetadata) -> BenchmarkClass {
        let children = metadata
            .methods()
            .iter()
            .filter(|method| IsBenchmarkMethod.test(method))
            .map(|method| {
                let handle = Arc::new(BenchmarkMethod::new(
                    metadata.class_name(),
                    method.name(),
                    method.parameter_types().iter().cloned(),
                    method.execution_mode().map(str::to_string),
                ));
                if method.is_parametrized() {
                    BenchmarkChild::Parametrized(Arc::new(ParametrizedBenchmarkMethod::new(
                        handle,
                        method.fixtures().to_vec(),
                    )))
                } else {
                    BenchmarkChild::Method(handle)
                }
            })
            .collect();

        BenchmarkClass::new(metadata.class_name(), metadata.tags().iter().cloned(), children)
    }
}
