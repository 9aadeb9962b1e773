//! Selection error types

use crate::event::Level;

/// Errors returned by controller selection operations.
///
/// Both variants signal caller error given correct view behavior (e.g.
/// stale UI state). A rejected operation leaves the controller's prior
/// state fully intact; the caller should re-derive valid input from
/// `available_options` before resubmitting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// The operation was invoked before its prerequisite was satisfied:
    /// either no dataset is installed, or the parent level is unselected.
    #[error("Operation '{operation}' requires {missing}")]
    NotInitialized {
        /// The rejected operation.
        operation: &'static str,
        /// What was missing.
        missing: &'static str,
    },

    /// The given name is not in the current valid option set for the level.
    #[error("Unknown {level} option '{name}'")]
    UnknownOption {
        /// Level the selection was attempted at.
        level: Level,
        /// The rejected display name.
        name: String,
    },
}

impl SelectError {
    /// Creates a new not-initialized error.
    pub fn not_initialized(operation: &'static str, missing: &'static str) -> Self {
        Self::NotInitialized { operation, missing }
    }

    /// Creates a new unknown-option error.
    pub fn unknown_option(level: Level, name: impl Into<String>) -> Self {
        Self::UnknownOption {
            level,
            name: name.into(),
        }
    }
}
