//! Store namespaces
//!
//! A [`Namespace`] is an ordered tuple of opaque tokens scoping store entries
//! so unrelated callers sharing one store never collide.

use once_cell::sync::Lazy;
use std::fmt::{self, Display, Formatter};

static GLOBAL: Lazy<Namespace> = Lazy::new(|| Namespace::new(["global"]));

/// Ordered tuple of opaque tokens scoping store entries
///
/// Equality is structural over the token sequence. The reserved
/// [`Namespace::global`] namespace is visible to all callers within one
/// scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    parts: Vec<String>,
}

impl Namespace {
    /// Create a namespace from ordered parts
    #[must_use]
    pub fn new(parts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// The reserved, cross-caller namespace
    #[inline]
    #[must_use]
    pub fn global() -> &'static Namespace {
        &GLOBAL
    }

    /// Whether this is the reserved global namespace
    #[inline]
    #[must_use]
    pub fn is_global(&self) -> bool {
        self == &*GLOBAL
    }

    /// Ordered namespace parts
    #[inline]
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Derive a narrower namespace by appending a part
    #[must_use]
    pub fn append(&self, part: impl Into<String>) -> Self {
        let mut parts = self.parts.clone();
        parts.push(part.into());
        Self { parts }
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaces_are_structurally_equal() {
        assert_eq!(Namespace::new(["a", "b"]), Namespace::new(["a", "b"]));
        assert_ne!(Namespace::new(["a", "b"]), Namespace::new(["b", "a"]));
    }

    #[test]
    fn global_is_reserved_and_stable() {
        assert!(Namespace::global().is_global());
        assert_eq!(Namespace::global(), &Namespace::new(["global"]));
    }

    #[test]
    fn append_derives_a_distinct_namespace() {
        let base = Namespace::new(["engine"]);
        let derived = base.append("jmh");

        assert_eq!(derived.parts(), &["engine", "jmh"]);
        assert_ne!(base, derived);
    }

    #[test]
    fn display_joins_parts() {
        assert_eq!(Namespace::new(["a", "b"]).to_string(), "a/b");
    }
}
