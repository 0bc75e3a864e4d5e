//! Namespaced hierarchical store
//!
//! A tree of namespaced key/value containers, one per descriptor node,
//! chained to the parent node's store:
//!
//! - Reads fall through the parent chain; writes always land locally.
//! - Entries are type-erased (`Arc<dyn Any + Send + Sync>`) with typed
//!   downcasting accessors.
//! - Teardown runs entries' close actions in reverse insertion order and
//!   aggregates failures instead of aborting on the first one.
//!
//! Ownership flows root-to-leaf (a parent never references a child store);
//! lookup flows leaf-to-root.
//!
//! # Example
//!
//! ```
//! use mbe_store::{Namespace, NamespacedHierarchicalStore};
//! use std::sync::Arc;
//!
//! let session = Arc::new(NamespacedHierarchicalStore::new(None));
//! let request = Arc::new(NamespacedHierarchicalStore::new(Some(Arc::clone(&session))));
//!
//! let ns = Namespace::new(["reporting"]);
//! session.put(ns.clone(), "format", "json".to_string()).unwrap();
//!
//! // Visible from the child through read fallthrough.
//! let format = request.get_as::<String>(&ns, "format").unwrap();
//! assert_eq!(*format, "json");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod namespace;
pub mod store;

// Re-exports
pub use error::{StoreCloseError, StoreError};
pub use namespace::Namespace;
pub use store::{CloseAction, NamespacedHierarchicalStore, StoredValue};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
