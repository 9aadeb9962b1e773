//! Dataset loading
//!
//! Provides the [`DatasetSource`] transport trait and the [`DatasetLoader`]
//! that turns raw provider bytes into a validated [`HierarchyDataset`].
//! This is the only part of the crate that performs I/O.

mod fixture;
mod http;

pub use fixture::*;
pub use http::*;

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use async_trait::async_trait;

use crate::config::CascadeConfig;
use crate::config::Comparator;
use crate::error::LoadError;
use crate::model::HierarchyDataset;

/// Trait for dataset transports.
///
/// Implementations retrieve the raw bytes of a dataset by key. Transport
/// failures (resource unavailable, timeout, unknown key) map to
/// [`LoadError::Unavailable`]; shape problems are the loader's concern,
/// not the source's.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetches the raw dataset bytes for the given key.
    async fn fetch(&self, dataset_key: &str) -> Result<Vec<u8>, LoadError>;
}

/// A successfully loaded dataset tagged with its load request id.
///
/// Request ids increase monotonically per loader. A controller installing
/// datasets via [`CascadeController::install`](crate::CascadeController::install)
/// uses the id to discard responses from superseded loads that arrive late.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// Monotonically increasing id of the load request that produced this.
    pub request_id: u64,
    /// The parsed, validated dataset.
    pub dataset: HierarchyDataset,
}

/// Fetches and parses datasets from a [`DatasetSource`].
///
/// The loader owns the active language and comparator; every load sorts
/// sibling sequences and validates the sibling-uniqueness invariant.
/// No caching happens at this layer.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cascade_lib::loader::{DatasetLoader, StaticDatasetSource};
/// use cascade_lib::CascadeConfig;
///
/// # async fn run() -> Result<(), cascade_lib::error::LoadError> {
/// let source = StaticDatasetSource::new()
///     .with_dataset("thailand", br#"[{"name_th": "Bangkok", "lv4": []}]"#.to_vec());
/// let loader = DatasetLoader::new(Arc::new(source), &CascadeConfig::new("thailand"));
/// let loaded = loader.load("thailand").await?;
/// # Ok(())
/// # }
/// ```
pub struct DatasetLoader {
    source: Arc<dyn DatasetSource>,
    language: String,
    comparator: Comparator,
    next_request_id: AtomicU64,
}

impl DatasetLoader {
    /// Creates a loader over the given source, taking language and
    /// comparator from the config.
    pub fn new(source: Arc<dyn DatasetSource>, config: &CascadeConfig) -> Self {
        Self {
            source,
            language: config.language.clone(),
            comparator: config.comparator.clone(),
            next_request_id: AtomicU64::new(1),
        }
    }

    /// Loads and validates the dataset for the given key.
    ///
    /// Each call is tagged with a fresh request id, so callers racing a
    /// reload against a slow earlier load can drop the stale result.
    ///
    /// # Errors
    ///
    /// - [`LoadError::Unavailable`] when the source cannot retrieve the key
    /// - [`LoadError::MalformedDataset`] when the bytes fail to parse or
    ///   violate the tree/uniqueness invariants
    pub async fn load(&self, dataset_key: &str) -> Result<LoadedDataset, LoadError> {
        let request_id = self.next_request_id.fetch_add(1, Ordering::SeqCst);
        log::debug!("loading dataset '{dataset_key}' (request {request_id})");

        let bytes = self.source.fetch(dataset_key).await?;
        let dataset = HierarchyDataset::parse(&bytes, &self.language, &self.comparator)?;
        log::debug!(
            "loaded dataset '{dataset_key}': {} regions (request {request_id})",
            dataset.len()
        );

        Ok(LoadedDataset {
            request_id,
            dataset,
        })
    }
}
