//! Expanded benchmark descriptor model
//!
//! The model produced by the
//! [`BenchmarkDescriptorFactory`](crate::factory::BenchmarkDescriptorFactory):
//! a [`BenchmarkClass`] container whose children are plain
//! [`BenchmarkMethod`]s or [`ParametrizedBenchmarkMethod`]s with materialized
//! [`BenchmarkFixture`]s. The discovery engine wraps these types in
//! descriptor-tree nodes; display names and source locators are projections
//! of this model, never duplicated state.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Source locator for a descriptor node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    /// A class declaration
    Class {
        /// Fully qualified class name
        class_name: String,
    },

    /// A method declaration
    Method {
        /// Fully qualified declaring class name
        class_name: String,
        /// Canonical method signature
        signature: String,
    },
}

/// A benchmark container backed by a class
///
/// Children are heterogeneous and declaration-ordered; the external model
/// owns them, the descriptor tree only exposes them through its own
/// parent/child relationship.
#[derive(Debug, Clone)]
pub struct BenchmarkClass {
    class_name: String,
    tags: Vec<String>,
    children: Vec<BenchmarkChild>,
}

impl BenchmarkClass {
    /// Create a container model
    #[must_use]
    pub fn new(
        class_name: impl Into<String>,
        tags: impl IntoIterator<Item = impl Into<String>>,
        children: Vec<BenchmarkChild>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            children,
        }
    }

    /// Fully qualified class name
    #[inline]
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Class-level tags
    #[inline]
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Declared children in declaration order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[BenchmarkChild] {
        &self.children
    }

    /// Source locator for this container
    #[inline]
    #[must_use]
    pub fn source(&self) -> Source {
        Source::Class {
            class_name: self.class_name.clone(),
        }
    }
}

/// One declared child of a benchmark container
#[derive(Debug, Clone)]
pub enum BenchmarkChild {
    /// A plain benchmark method
    Method(Arc<BenchmarkMethod>),

    /// A parametrized benchmark method with materialized fixtures
    Parametrized(Arc<ParametrizedBenchmarkMethod>),
}

impl BenchmarkChild {
    /// The underlying method handle, regardless of variant
    #[must_use]
    pub fn underlying_method(&self) -> &Arc<BenchmarkMethod> {
        match self {
            Self::Method(method) => method,
            Self::Parametrized(parametrized) => parametrized.method(),
        }
    }

    /// Canonical signature of the underlying method
    #[inline]
    #[must_use]
    pub fn signature(&self) -> String {
        self.underlying_method().signature()
    }
}

/// A benchmark method handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkMethod {
    declaring_class: String,
    name: String,
    parameter_types: Vec<String>,
    execution_mode: Option<String>,
}

impl BenchmarkMethod {
    /// Create a method handle
    #[must_use]
    pub fn new(
        declaring_class: impl Into<String>,
        name: impl Into<String>,
        parameter_types: impl IntoIterator<Item = impl Into<String>>,
        execution_mode: Option<String>,
    ) -> Self {
        Self {
            declaring_class: declaring_class.into(),
            name: name.into(),
            parameter_types: parameter_types.into_iter().map(Into::into).collect(),
            execution_mode,
        }
    }

    /// Fully qualified declaring class name
    #[inline]
    #[must_use]
    pub fn declaring_class(&self) -> &str {
        &self.declaring_class
    }

    /// Method name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared execution mode, if any
    #[inline]
    #[must_use]
    pub fn execution_mode(&self) -> Option<&str> {
        self.execution_mode.as_deref()
    }

    /// Canonical method signature, `name(type1,type2)`
    #[must_use]
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.parameter_types.join(","))
    }

    /// Source locator for this method
    #[must_use]
    pub fn source(&self) -> Source {
        Source::Method {
            class_name: self.declaring_class.clone(),
            signature: self.signature(),
        }
    }
}

/// A parametrized benchmark method
///
/// Fixtures are already materialized by the external model; discovery never
/// computes parameter combinations itself.
#[derive(Debug, Clone)]
pub struct ParametrizedBenchmarkMethod {
    method: Arc<BenchmarkMethod>,
    fixtures: Vec<BenchmarkFixture>,
}

impl ParametrizedBenchmarkMethod {
    /// Create a parametrized method from its handle and fixtures
    #[inline]
    #[must_use]
    pub fn new(method: Arc<BenchmarkMethod>, fixtures: Vec<BenchmarkFixture>) -> Self {
        Self { method, fixtures }
    }

    /// The underlying method handle
    #[inline]
    #[must_use]
    pub fn method(&self) -> &Arc<BenchmarkMethod> {
        &self.method
    }

    /// Materialized fixtures in declaration order
    #[inline]
    #[must_use]
    pub fn fixtures(&self) -> &[BenchmarkFixture] {
        &self.fixtures
    }
}

/// One concrete parameter combination of a parametrized method
///
/// The display name is the fixture's identity within its parent: the fixture
/// resolver locates fixtures by exact display-name equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkFixture {
    display_name: String,
    parameters: IndexMap<String, String>,
}

impl BenchmarkFixture {
    /// Create a fixture from parameter assignments
    ///
    /// The display name is derived from the assignments, e.g. `[n=1,depth=4]`.
    #[must_use]
    pub fn new(
        parameters: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        let parameters: IndexMap<String, String> = parameters
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        let rendered: Vec<String> = parameters
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        Self {
            display_name: format!("[{}]", rendered.join(",")),
            parameters,
        }
    }

    /// Create a fixture with an explicit display name
    #[must_use]
    pub fn named(
        display_name: impl Into<String>,
        parameters: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            parameters: parameters
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Display name, the fixture's identity within its parent
    #[inline]
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Parameter assignments in declaration order
    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &IndexMap<String, String> {
        &self.parameters
    }
}

impl Display for BenchmarkFixture {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, params: &[&str]) -> Arc<BenchmarkMethod> {
        Arc::new(BenchmarkMethod::new(
            "com.acme.Bench",
            name,
            params.iter().copied(),
            None,
        ))
    }

    #[test]
    fn benchmark_method_signature() {
        let m = method("scan", &["com.acme.Bench$State"]);
        assert_eq!(m.signature(), "scan(com.acme.Bench$State)");
    }

    #[test]
    fn benchmark_method_source() {
        let m = method("run", &[]);
        assert_eq!(
            m.source(),
            Source::Method {
                class_name: "com.acme.Bench".to_string(),
                signature: "run()".to_string(),
            }
        );
    }

    #[test]
    fn child_underlying_method_for_both_variants() {
        let plain = BenchmarkChild::Method(method("run", &[]));
        assert_eq!(plain.signature(), "run()");

        let parametrized = BenchmarkChild::Parametrized(Arc::new(ParametrizedBenchmarkMethod::new(
            method("scan", &["com.acme.Bench$State"]),
            vec![BenchmarkFixture::new([("n", "1")])],
        )));
        assert_eq!(parametrized.signature(), "scan(com.acme.Bench$State)");
    }

    #[test]
    fn fixture_display_name_from_parameters() {
        let fixture = BenchmarkFixture::new([("n", "1"), ("depth", "4")]);
        assert_eq!(fixture.display_name(), "[n=1,depth=4]");
    }

    #[test]
    fn fixture_named_keeps_explicit_display_name() {
        let fixture = BenchmarkFixture::named("[custom]", [("n", "1")]);
        assert_eq!(fixture.display_name(), "[custom]");
        assert_eq!(fixture.parameters().get("n").map(String::as_str), Some("1"));
    }

    #[test]
    fn fixture_serde_keeps_parameter_order() {
        let fixture = BenchmarkFixture::new([("n", "1"), ("depth", "4")]);
        let json = serde_json::to_string(&fixture).unwrap();
        let back: BenchmarkFixture = serde_json::from_str(&json).unwrap();

        assert_eq!(back, fixture);
        assert_eq!(back.display_name(), "[n=1,depth=4]");
    }

    #[test]
    fn class_children_keep_declaration_order() {
        let class = BenchmarkClass::new(
            "com.acme.Bench",
            Vec::<String>::new(),
            vec![
                BenchmarkChild::Method(method("first", &[])),
                BenchmarkChild::Method(method("second", &[])),
            ],
        );

        let signatures: Vec<_> = class.children().iter().map(BenchmarkChild::signature).collect();
        assert_eq!(signatures, vec!["first()", "second()"]);
    }
}
