//! HTTP dataset source

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::DatasetSource;
use crate::error::LoadError;

/// A dataset source that fetches `<base_url><key>.json` over HTTP.
///
/// Mirrors the provider's CDN layout: datasets live side by side under a
/// base path and are addressed by key (e.g. a country identifier).
///
/// # Example
///
/// ```
/// use cascade_lib::loader::HttpDatasetSource;
/// use url::Url;
///
/// let base = Url::parse("https://cdn.example.com/data/country/").unwrap();
/// let source = HttpDatasetSource::new(base)
///     .with_timeout(std::time::Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct HttpDatasetSource {
    base_url: Url,
    client: Client,
    timeout: Option<Duration>,
}

impl HttpDatasetSource {
    /// Creates a new source rooted at the given base URL.
    ///
    /// The base URL should end with a trailing slash so keys join as path
    /// segments rather than replacing the last one.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            client: Client::new(),
            timeout: None,
        }
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses a pre-configured HTTP client instead of the default.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Returns the base URL datasets are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl DatasetSource for HttpDatasetSource {
    async fn fetch(&self, dataset_key: &str) -> Result<Vec<u8>, LoadError> {
        let url = self
            .base_url
            .join(&format!("{dataset_key}.json"))
            .map_err(|e| LoadError::unavailable(dataset_key, format!("invalid URL: {e}")))?;

        let mut request = self.client.get(url.clone());
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LoadError::unavailable(dataset_key, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::unavailable(
                dataset_key,
                format!("HTTP {} from {url}", status.as_u16()),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LoadError::unavailable(dataset_key, e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
