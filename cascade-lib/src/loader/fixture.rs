//! In-memory dataset source

use std::collections::HashMap;

use async_trait::async_trait;

use super::DatasetSource;
use crate::error::LoadError;

/// A dataset source serving fixed byte blobs from memory.
///
/// Useful for tests and for applications that bundle their datasets.
///
/// # Example
///
/// ```
/// use cascade_lib::loader::StaticDatasetSource;
///
/// let source = StaticDatasetSource::new()
///     .with_dataset("thailand", br#"[]"#.to_vec());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticDatasetSource {
    datasets: HashMap<String, Vec<u8>>,
}

impl StaticDatasetSource {
    /// Creates a new empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dataset under the given key.
    pub fn with_dataset(mut self, dataset_key: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.datasets.insert(dataset_key.into(), bytes);
        self
    }
}

#[async_trait]
impl DatasetSource for StaticDatasetSource {
    async fn fetch(&self, dataset_key: &str) -> Result<Vec<u8>, LoadError> {
        self.datasets
            .get(dataset_key)
            .cloned()
            .ok_or_else(|| LoadError::unavailable(dataset_key, "unknown dataset key"))
    }
}
