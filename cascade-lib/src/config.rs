//! Engine configuration

use std::cmp::Ordering;
use std::sync::Arc;

/// Pluggable ordering over localized display names.
///
/// Applied to every sibling option set, at load time and again on every
/// recompute. The default compares byte-wise; plug in a collation-aware
/// closure for locale-sensitive ordering.
pub type Comparator = Arc<dyn Fn(&str, &str) -> Ordering + Send + Sync>;

/// Returns the default lexical comparator.
pub fn lexical_comparator() -> Comparator {
    Arc::new(|a: &str, b: &str| a.cmp(b))
}

/// Configuration shared by the loader/controller pair.
///
/// # Example
///
/// ```
/// use cascade_lib::CascadeConfig;
///
/// let config = CascadeConfig::new("thailand").with_language("en");
/// ```
#[derive(Clone)]
pub struct CascadeConfig {
    /// Key identifying the dataset to load (e.g. a country identifier).
    pub dataset_key: String,

    /// Language code selecting which localized `name_<language>` field
    /// participates in display and matching.
    ///
    /// Default: `"th"`
    pub language: String,

    /// Comparator applied to every option set.
    ///
    /// Default: lexical byte-wise ordering
    pub comparator: Comparator,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            dataset_key: String::new(),
            language: "th".to_string(),
            comparator: lexical_comparator(),
        }
    }
}

impl CascadeConfig {
    /// Creates a config for the given dataset key with default values.
    pub fn new(dataset_key: impl Into<String>) -> Self {
        Self {
            dataset_key: dataset_key.into(),
            ..Self::default()
        }
    }

    /// Sets the active language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the comparator.
    pub fn with_comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = comparator;
        self
    }
}

impl std::fmt::Debug for CascadeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CascadeConfig")
            .field("dataset_key", &self.dataset_key)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}
