//! Error types for the engine surface
//!
//! Unknown enum-like inputs (an unrecognized execution mode) indicate a
//! collaborator violating its contract and are reported immediately; output
//! publication failures are fatal for the single publish operation only.

/// Errors for engine configuration, scoping, and publication
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A collaborator declared an execution mode this engine does not know
    #[error("unknown execution mode '{0}'")]
    UnknownExecutionMode(String),

    /// A store facade was built from a request store without a session parent
    #[error("request-level store must have a session-level parent")]
    MissingSessionStore,

    /// An artifact name would escape the node's output directory
    #[error("artifact name must be a single path component: '{0}'")]
    InvalidArtifactName(String),

    /// Output directory creation failed
    #[error("failed to create output directory")]
    OutputDirectory(#[from] std::io::Error),

    /// The producing action of a publish operation failed
    #[error("failed to publish '{name}'")]
    PublishFailed {
        /// The artifact name being published
        name: String,
        /// The underlying action failure
        #[source]
        source: anyhow::Error,
    },

    /// The published path did not exist as a directory after the action ran
    #[error("published path must be a directory: '{0}'")]
    MissingPublishedPath(String),
}
