//! Class lookup interface
//!
//! [`BenchmarkUniverse`] is the discovery engine's window onto the code base:
//! it resolves class names to metadata and enumerates the classes of a
//! package. It replaces reflective class loading with an explicit, read-only
//! collaborator interface.

use crate::metadata::ClassMetadata;
use std::sync::Arc;

/// Read-only lookup over the candidate classes of a code base
pub trait BenchmarkUniverse: Send + Sync {
    /// Resolve a fully qualified class name
    ///
    /// Returns `None` when the class does not exist; the caller treats that
    /// as an unresolvable selector, not an error.
    fn find_class(&self, class_name: &str) -> Option<Arc<ClassMetadata>>;

    /// Enumerate the classes declared in a package, in a stable order
    fn scan_package(&self, package: &str) -> Vec<Arc<ClassMetadata>>;
}
