//! Error types for discovery
//!
//! Unresolvable selectors are not errors: resolvers answer `Unresolved` and
//! the orchestrator silently continues. The variants here indicate a
//! collaborator violating its contract.

use crate::unique_id::UniqueId;

/// Errors for descriptor-tree construction
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// A resolver produced a child id that does not extend its parent's id
    /// by exactly one segment
    #[error("child id '{child}' does not extend parent id '{parent}' by one segment")]
    IdPrefixMismatch {
        /// The offending child id
        child: UniqueId,
        /// The parent the child was inserted under
        parent: UniqueId,
    },
}
