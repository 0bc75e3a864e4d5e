//! Execution modes
//!
//! Nodes may execute concurrently or pinned to the invoking thread. The mode
//! constrains the store: concurrent siblings read and write their stores
//! from different worker threads while the finished tree stays immutable.

use crate::error::EngineError;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Declared execution mode of a benchmark node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionMode {
    /// Sibling and cousin nodes may execute on different worker threads
    Concurrent,

    /// The node executes on the invoking thread
    #[default]
    SameThread,
}

impl ExecutionMode {
    /// Canonical string form
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concurrent => "concurrent",
            Self::SameThread => "same_thread",
        }
    }
}

impl Display for ExecutionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionMode {
    type Err = EngineError;

    /// Parse a declared mode
    ///
    /// An unrecognized value is a fatal contract violation, never silently
    /// defaulted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "concurrent" => Ok(Self::Concurrent),
            "same_thread" => Ok(Self::SameThread),
            other => Err(EngineError::UnknownExecutionMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_forms_round_trip() {
        for mode in [ExecutionMode::Concurrent, ExecutionMode::SameThread] {
            assert_eq!(mode.as_str().parse::<ExecutionMode>().unwrap(), mode);
        }
    }

    #[test]
    fn unknown_mode_is_a_contract_violation() {
        let result = "sometimes".parse::<ExecutionMode>();
        assert!(matches!(
            result,
            Err(EngineError::UnknownExecutionMode(value)) if value == "sometimes"
        ));
    }
}
