//! Dataset loading error types

/// Errors that can occur while fetching or parsing a dataset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The dataset resource could not be retrieved (transport failure,
    /// timeout, unknown key).
    #[error("Dataset '{dataset_key}' unavailable: {message}")]
    Unavailable {
        /// Key of the dataset that was requested.
        dataset_key: String,
        /// Description of the transport failure.
        message: String,
    },

    /// The resource was retrieved but does not satisfy the expected
    /// three-level shape or its invariants.
    #[error("Malformed dataset: {message}")]
    MalformedDataset {
        /// Description of the shape or invariant violation.
        message: String,
    },
}

impl LoadError {
    /// Creates a new unavailable error.
    pub fn unavailable(dataset_key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unavailable {
            dataset_key: dataset_key.into(),
            message: message.into(),
        }
    }

    /// Creates a new malformed-dataset error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDataset {
            message: message.into(),
        }
    }

    /// Returns `true` if this error is potentially retryable.
    ///
    /// Transport failures are transient; a malformed dataset will stay
    /// malformed until the provider fixes it.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
