//! Selector resolvers
//!
//! Each resolver turns one selector kind into a [`Resolution`]: either
//! [`Resolution::Unresolved`] ("no opinion, try the next resolver") or a
//! match on a tree node with an optional lazy [`Expansion`] of further
//! selectors. Resolvers never mutate the tree directly; every insertion goes
//! through the [`ResolutionContext`](crate::context::ResolutionContext).
//!
//! The resolver set is an explicit tagged variant rather than reflective
//! dispatch: the orchestrator matches on selector kind, not on resolver
//! identity.

pub mod container;
pub mod fixture;
pub mod method;

pub use container::ContainerResolver;
pub use fixture::FixtureResolver;
pub use method::MethodResolver;

use crate::context::ResolutionContext;
use crate::descriptor::BenchmarkNode;
use crate::selector::DiscoverySelector;
use std::fmt;
use std::sync::Arc;

/// Outcome of handing one selector to one resolver
#[derive(Debug)]
pub enum Resolution {
    /// The resolver has no opinion on this selector
    Unresolved,

    /// The selector resolved to a tree node
    Match(ResolvedMatch),
}

impl Resolution {
    /// The unresolved outcome
    #[inline]
    #[must_use]
    pub fn unresolved() -> Self {
        Self::Unresolved
    }

    /// A match without further selectors
    #[inline]
    #[must_use]
    pub fn matched(node: Arc<BenchmarkNode>) -> Self {
        Self::Match(ResolvedMatch {
            node,
            expansion: None,
        })
    }

    /// A match carrying a lazy expansion of further selectors
    #[inline]
    #[must_use]
    pub fn matched_with_expansion(node: Arc<BenchmarkNode>, expansion: Expansion) -> Self {
        Self::Match(ResolvedMatch {
            node,
            expansion: Some(expansion),
        })
    }

    /// Whether this is the unresolved outcome
    #[inline]
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved)
    }
}

/// A successful match and its optional expansion
#[derive(Debug)]
pub struct ResolvedMatch {
    node: Arc<BenchmarkNode>,
    expansion: Option<Expansion>,
}

impl ResolvedMatch {
    /// The matched node
    #[inline]
    #[must_use]
    pub fn node(&self) -> &Arc<BenchmarkNode> {
        &self.node
    }

    /// Consume the match, keeping only the node
    ///
    /// Any expansion is dropped unevaluated — this is how parent resolution
    /// through the context avoids walking a class's full method/fixture set.
    #[inline]
    #[must_use]
    pub fn into_node(self) -> Arc<BenchmarkNode> {
        self.node
    }

    /// Consume the match, keeping only the expansion
    #[inline]
    #[must_use]
    pub fn into_expansion(self) -> Option<Expansion> {
        self.expansion
    }
}

/// Deferred, single-evaluation sequence of further selectors
///
/// An expansion represents a match's not-yet-discovered children. It is
/// evaluated at most once, and only when the orchestrator feeds it back into
/// the pending set; parents resolved through the context drop it unevaluated.
pub struct Expansion {
    produce: Box<dyn FnOnce() -> Vec<DiscoverySelector>>,
}

impl Expansion {
    /// Create an expansion from a deferred producer
    #[must_use]
    pub fn new(produce: impl FnOnce() -> Vec<DiscoverySelector> + 'static) -> Self {
        Self {
            produce: Box::new(produce),
        }
    }

    /// Evaluate the expansion, consuming it
    #[must_use]
    pub fn materialize(self) -> Vec<DiscoverySelector> {
        (self.produce)()
    }
}

impl fmt::Debug for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Expansion(..)")
    }
}

/// The resolver set, one variant per selector-resolution capability
#[derive(Debug)]
pub enum SelectorResolver {
    /// Resolves class, class-unique-id, and package selectors
    Container(ContainerResolver),

    /// Resolves method and method-unique-id selectors
    Method(MethodResolver),

    /// Resolves fixture-unique-id selectors
    Fixture(FixtureResolver),
}

impl SelectorResolver {
    /// Hand a selector to this resolver
    pub fn resolve(
        &self,
        selector: &DiscoverySelector,
        ctx: &mut ResolutionContext<'_>,
    ) -> Resolution {
        match self {
            Self::Container(resolver) => resolver.resolve(selector, ctx),
            Self::Method(resolver) => resolver.resolve(selector, ctx),
            Self::Fixture(resolver) => resolver.resolve(selector, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::DescriptorTree;

    #[test]
    fn expansion_is_evaluated_lazily_and_once() {
        use std::cell::Cell;
        use std::rc::Rc;

        let evaluations = Rc::new(Cell::new(0));
        let counter = Rc::clone(&evaluations);
        let expansion = Expansion::new(move || {
            counter.set(counter.get() + 1);
            Vec::new()
        });

        assert_eq!(evaluations.get(), 0);
        assert!(expansion.materialize().is_empty());
        assert_eq!(evaluations.get(), 1);
    }

    #[test]
    fn dropping_a_match_never_evaluates_its_expansion() {
        use std::cell::Cell;
        use std::rc::Rc;

        let evaluations = Rc::new(Cell::new(0));
        let counter = Rc::clone(&evaluations);
        let tree = DescriptorTree::new("e", "Engine");
        let resolution = Resolution::matched_with_expansion(
            Arc::clone(tree.root()),
            Expansion::new(move || {
                counter.set(counter.get() + 1);
                Vec::new()
            }),
        );

        if let Resolution::Match(matched) = resolution {
            let _node = matched.into_node();
        }
        assert_eq!(evaluations.get(), 0);
    }
}
