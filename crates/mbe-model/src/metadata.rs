//! Raw class and method metadata
//!
//! Provides [`ClassMetadata`] and [`MethodMetadata`], the unexpanded shape of
//! a candidate benchmark class as reported by a
//! [`BenchmarkUniverse`](crate::universe::BenchmarkUniverse).

use crate::model::BenchmarkFixture;
use serde::{Deserialize, Serialize};

/// Metadata for a candidate benchmark class
///
/// This is the raw, declaration-ordered view of a class before the
/// [`BenchmarkDescriptorFactory`](crate::factory::BenchmarkDescriptorFactory)
/// expands it into a [`BenchmarkClass`](crate::model::BenchmarkClass) model.
/// Method order is declaration order, listed top-down across the inheritance
/// chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetadata {
    /// Fully qualified class name, e.g. `com.acme.Bench`
    class_name: String,

    /// Declared methods, top-down
    methods: Vec<MethodMetadata>,

    /// Tags declared on the class
    tags: Vec<String>,
}

impl ClassMetadata {
    /// Create metadata for a class with no methods
    #[inline]
    #[must_use]
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            methods: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Append a declared method
    #[inline]
    #[must_use]
    pub fn with_method(mut self, method: MethodMetadata) -> Self {
        self.methods.push(method);
        self
    }

    /// Attach class-level tags
    #[inline]
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Fully qualified class name
    #[inline]
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Package portion of the class name (empty for unpackaged classes)
    #[must_use]
    pub fn package_name(&self) -> &str {
        self.class_name
            .rsplit_once('.')
            .map_or("", |(package, _)| package)
    }

    /// Declared methods in declaration order
    #[inline]
    #[must_use]
    pub fn methods(&self) -> &[MethodMetadata] {
        &self.methods
    }

    /// Class-level tags
    #[inline]
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Metadata for a single declared method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodMetadata {
    /// Method name
    name: String,

    /// Fully qualified parameter type names, in order
    parameter_types: Vec<String>,

    /// Whether the method qualifies as a benchmark
    benchmark: bool,

    /// Materialized parameter combinations (empty for plain methods)
    fixtures: Vec<BenchmarkFixture>,

    /// Declared execution mode, if any (opaque to the model)
    execution_mode: Option<String>,
}

impl MethodMetadata {
    /// Create metadata for a non-benchmark method
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        parameter_types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            parameter_types: parameter_types.into_iter().map(Into::into).collect(),
            benchmark: false,
            fixtures: Vec::new(),
            execution_mode: None,
        }
    }

    /// Create metadata for a benchmark method
    #[must_use]
    pub fn benchmark(
        name: impl Into<String>,
        parameter_types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            benchmark: true,
            ..Self::new(name, parameter_types)
        }
    }

    /// Attach materialized fixtures, turning this into a parametrized method
    #[inline]
    #[must_use]
    pub fn with_fixtures(mut self, fixtures: impl IntoIterator<Item = BenchmarkFixture>) -> Self {
        self.fixtures.extend(fixtures);
        self
    }

    /// Declare an execution mode (e.g. `concurrent`, `same_thread`)
    #[inline]
    #[must_use]
    pub fn with_execution_mode(mut self, mode: impl Into<String>) -> Self {
        self.execution_mode = Some(mode.into());
        self
    }

    /// Method name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter type names in declaration order
    #[inline]
    #[must_use]
    pub fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }

    /// Whether this method qualifies as a benchmark
    #[inline]
    #[must_use]
    pub fn is_benchmark(&self) -> bool {
        self.benchmark
    }

    /// Whether this method has materialized parameter combinations
    #[inline]
    #[must_use]
    pub fn is_parametrized(&self) -> bool {
        !self.fixtures.is_empty()
    }

    /// Materialized fixtures (empty for plain methods)
    #[inline]
    #[must_use]
    pub fn fixtures(&self) -> &[BenchmarkFixture] {
        &self.fixtures
    }

    /// Declared execution mode, if any
    #[inline]
    #[must_use]
    pub fn execution_mode(&self) -> Option<&str> {
        self.execution_mode.as_deref()
    }

    /// Canonical method signature, `name(type1,type2)`
    ///
    /// Disambiguates overloaded methods; this string is the method's identity
    /// within its declaring class and the `method` unique-id segment value.
    #[must_use]
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.parameter_types.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_metadata_package_name() {
        let meta = ClassMetadata::new("com.acme.Bench");
        assert_eq!(meta.package_name(), "com.acme");

        let unpackaged = ClassMetadata::new("Bench");
        assert_eq!(unpackaged.package_name(), "");
    }

    #[test]
    fn class_metadata_methods_keep_declaration_order() {
        let meta = ClassMetadata::new("com.acme.Bench")
            .with_method(MethodMetadata::benchmark("first", Vec::<String>::new()))
            .with_method(MethodMetadata::benchmark("second", Vec::<String>::new()));

        let names: Vec<_> = meta.methods().iter().map(MethodMetadata::name).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn method_signature_plain() {
        let method = MethodMetadata::benchmark("run", Vec::<String>::new());
        assert_eq!(method.signature(), "run()");
    }

    #[test]
    fn method_signature_with_parameters() {
        let method = MethodMetadata::benchmark("scan", ["com.acme.Bench$State", "int"]);
        assert_eq!(method.signature(), "scan(com.acme.Bench$State,int)");
    }

    #[test]
    fn method_is_parametrized_only_with_fixtures() {
        let plain = MethodMetadata::benchmark("run", Vec::<String>::new());
        assert!(!plain.is_parametrized());

        let parametrized = plain.with_fixtures([BenchmarkFixture::new([("n", "1")])]);
        assert!(parametrized.is_parametrized());
    }

    #[test]
    fn method_execution_mode_declaration() {
        let method =
            MethodMetadata::benchmark("run", Vec::<String>::new()).with_execution_mode("concurrent");
        assert_eq!(method.execution_mode(), Some("concurrent"));
    }
}
