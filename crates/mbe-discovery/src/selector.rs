//! Discovery selectors
//!
//! A [`DiscoverySelector`] describes what the caller wants discovered: a
//! class, a method, a unique id, or a package. Selectors are plain values;
//! the orchestrator deduplicates them structurally to guarantee termination.

use crate::unique_id::UniqueId;
use std::fmt::{self, Display, Formatter};

/// A discovery query of one of four kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiscoverySelector {
    /// Select a class by fully qualified name
    Class {
        /// Fully qualified class name
        class_name: String,
    },

    /// Select a method by declaring class and canonical signature
    Method {
        /// Fully qualified declaring class name
        class_name: String,
        /// Canonical method signature, `name(type1,type2)`
        signature: String,
    },

    /// Select a node by its unique id
    UniqueId(UniqueId),

    /// Select every qualifying class of a package
    Package {
        /// Package name
        package_name: String,
    },
}

/// Select a class by fully qualified name
#[inline]
#[must_use]
pub fn select_class(class_name: impl Into<String>) -> DiscoverySelector {
    DiscoverySelector::Class {
        class_name: class_name.into(),
    }
}

/// Select a method by declaring class and canonical signature
#[inline]
#[must_use]
pub fn select_method(
    class_name: impl Into<String>,
    signature: impl Into<String>,
) -> DiscoverySelector {
    DiscoverySelector::Method {
        class_name: class_name.into(),
        signature: signature.into(),
    }
}

/// Select a node by unique id
#[inline]
#[must_use]
pub fn select_unique_id(unique_id: UniqueId) -> DiscoverySelector {
    DiscoverySelector::UniqueId(unique_id)
}

/// Select every qualifying class of a package
#[inline]
#[must_use]
pub fn select_package(package_name: impl Into<String>) -> DiscoverySelector {
    DiscoverySelector::Package {
        package_name: package_name.into(),
    }
}

impl Display for DiscoverySelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class { class_name } => write!(f, "class {class_name}"),
            Self::Method {
                class_name,
                signature,
            } => write!(f, "method {class_name}#{signature}"),
            Self::UniqueId(unique_id) => write!(f, "unique id {unique_id}"),
            Self::Package { package_name } => write!(f, "package {package_name}"),
        }
    }
}
