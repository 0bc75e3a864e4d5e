//! Engine configuration
//!
//! Provides [`EngineConfig`]: raw string parameters with typed lookup, the
//! default execution mode, the output-directory provider, and the stored
//! closeable-resource policy.

use crate::error::EngineError;
use crate::mode::ExecutionMode;
use crate::output::OutputDirectoryProvider;
use crate::resources::DualCloseablePolicy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Configuration parameter naming the default execution mode
pub const EXECUTION_MODE_PARAM: &str = "microbenchmark.execution.mode";

/// Engine-wide configuration shared by every context of a request
pub struct EngineConfig {
    parameters: HashMap<String, String>,
    output_directory_provider: Arc<dyn OutputDirectoryProvider>,
    auto_close_stored_resources: bool,
    dual_closeable_policy: DualCloseablePolicy,
    default_execution_mode: ExecutionMode,
}

impl EngineConfig {
    /// Create a configuration with defaults
    ///
    /// Auto-close of stored resources is enabled, the dual-closeable policy
    /// warns, and the default execution mode is
    /// [`ExecutionMode::SameThread`].
    #[must_use]
    pub fn new(output_directory_provider: Arc<dyn OutputDirectoryProvider>) -> Self {
        Self {
            parameters: HashMap::new(),
            output_directory_provider,
            auto_close_stored_resources: true,
            dual_closeable_policy: DualCloseablePolicy::default(),
            default_execution_mode: ExecutionMode::default(),
        }
    }

    /// Attach raw configuration parameters
    #[must_use]
    pub fn with_parameters(
        mut self,
        parameters: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        self.parameters.extend(
            parameters
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        self
    }

    /// Toggle auto-closing of stored closeable resources
    #[inline]
    #[must_use]
    pub fn with_auto_close_stored_resources(mut self, enabled: bool) -> Self {
        self.auto_close_stored_resources = enabled;
        self
    }

    /// Set the policy for values carrying both closeable capabilities
    #[inline]
    #[must_use]
    pub fn with_dual_closeable_policy(mut self, policy: DualCloseablePolicy) -> Self {
        self.dual_closeable_policy = policy;
        self
    }

    /// Set the fallback execution mode for nodes without a declaration
    #[inline]
    #[must_use]
    pub fn with_default_execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.default_execution_mode = mode;
        self
    }

    /// Raw parameter lookup
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    /// Parameter lookup through a transformer
    #[must_use]
    pub fn parameter_with<T>(
        &self,
        key: &str,
        transform: impl FnOnce(&str) -> Option<T>,
    ) -> Option<T> {
        self.parameter(key).and_then(transform)
    }

    /// The default execution mode
    ///
    /// The [`EXECUTION_MODE_PARAM`] parameter overrides the configured
    /// default.
    ///
    /// # Errors
    /// [`EngineError::UnknownExecutionMode`] when the parameter carries an
    /// unrecognized value — a collaborator contract violation, reported
    /// immediately.
    pub fn default_execution_mode(&self) -> Result<ExecutionMode, EngineError> {
        match self.parameter(EXECUTION_MODE_PARAM) {
            Some(raw) => raw.parse(),
            None => Ok(self.default_execution_mode),
        }
    }

    /// Whether stored closeable resources are closed on teardown
    #[inline]
    #[must_use]
    pub fn auto_close_stored_resources(&self) -> bool {
        self.auto_close_stored_resources
    }

    /// The dual-closeable-capability policy
    #[inline]
    #[must_use]
    pub fn dual_closeable_policy(&self) -> DualCloseablePolicy {
        self.dual_closeable_policy
    }

    /// The per-node output-directory provider
    #[inline]
    #[must_use]
    pub fn output_directory_provider(&self) -> &Arc<dyn OutputDirectoryProvider> {
        &self.output_directory_provider
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("parameters", &self.parameters.len())
            .field("auto_close_stored_resources", &self.auto_close_stored_resources)
            .field("dual_closeable_policy", &self.dual_closeable_policy)
            .field("default_execution_mode", &self.default_execution_mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::DefaultOutputDirectoryProvider;

    fn config() -> EngineConfig {
        EngineConfig::new(Arc::new(DefaultOutputDirectoryProvider::new("/tmp/mbe")))
    }

    #[test]
    fn parameter_lookup_and_transform() {
        let config = config().with_parameters([("jmh.forks", "3")]);

        assert_eq!(config.parameter("jmh.forks"), Some("3"));
        assert_eq!(
            config.parameter_with("jmh.forks", |raw| raw.parse::<u32>().ok()),
            Some(3)
        );
        assert!(config.parameter("absent").is_none());
    }

    #[test]
    fn execution_mode_parameter_overrides_default() {
        let config = config()
            .with_default_execution_mode(ExecutionMode::SameThread)
            .with_parameters([(EXECUTION_MODE_PARAM, "concurrent")]);

        assert_eq!(
            config.default_execution_mode().unwrap(),
            ExecutionMode::Concurrent
        );
    }

    #[test]
    fn unknown_execution_mode_parameter_is_fatal() {
        let config = config().with_parameters([(EXECUTION_MODE_PARAM, "eventually")]);

        assert!(matches!(
            config.default_execution_mode(),
            Err(EngineError::UnknownExecutionMode(_))
        ));
    }
}
