//! Error types for the hierarchical store

use crate::namespace::Namespace;

/// Errors for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Write attempted after the store was closed
    #[error("store is already closed")]
    Closed,

    /// Stored value does not have the requested type
    #[error("value under ({namespace}, {key}) is not of the requested type")]
    TypeMismatch {
        /// Namespace of the offending entry
        namespace: Namespace,
        /// Key of the offending entry
        key: String,
    },
}

/// Aggregate failure raised once store teardown has attempted every entry
///
/// One failing close action never prevents the remaining entries from being
/// closed; all failures are collected and surfaced together.
#[derive(Debug, thiserror::Error)]
#[error("{} close action(s) failed during store teardown", .failures.len())]
pub struct StoreCloseError {
    failures: Vec<anyhow::Error>,
}

impl StoreCloseError {
    pub(crate) fn new(failures: Vec<anyhow::Error>) -> Self {
        Self { failures }
    }

    /// Individual close-action failures, in teardown order
    #[inline]
    #[must_use]
    pub fn failures(&self) -> &[anyhow::Error] {
        &self.failures
    }
}
