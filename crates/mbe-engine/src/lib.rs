//! Microbenchmark engine surface
//!
//! Ties discovery to execution: the [`MicrobenchmarkEngine`] resolves
//! discovery requests into a descriptor tree, and [`BenchmarkContext`]s give
//! executing nodes scope-addressed store access, report publication, and
//! per-node output directories.
//!
//! Store scoping forms a single ownership chain: the session-level store
//! outlives the request-level store, which outlives every per-node store.
//! Context teardown closes only the node store; request and session stores
//! are owned by their respective lifecycles.

#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod listener;
pub mod mode;
pub mod output;
pub mod resources;
pub mod scopes;

// Re-exports
pub use config::{EngineConfig, EXECUTION_MODE_PARAM};
pub use context::BenchmarkContext;
pub use engine::{MicrobenchmarkEngine, ENGINE_DISPLAY_NAME, ENGINE_ID};
pub use error::EngineError;
pub use listener::{NoopReportListener, ReportListener};
pub use mode::ExecutionMode;
pub use output::{DefaultOutputDirectoryProvider, OutputDirectoryProvider};
pub use resources::{
    managed_close_action, CloseableResource, DualCloseablePolicy, LegacyCloseableResource,
    ManagedResource,
};
pub use scopes::{ScopedStore, StoreFacade, StoreScope};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
