//! Configuration for the search layer
//!
//! `SearchConfig` carries the knobs shared by the client, session, and
//! aggregator: API base URL, debounce interval, and the aggregator cache
//! window. Built with a fluent interface and sensible defaults.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default interval a query must stay stable before suggestions fire
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default freshness window for aggregated documents (12 hours)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 12 * 60 * 60;

/// Configuration shared by the search client, session, and aggregator
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL of the backend API
    pub api_base: Url,
    /// How long a query must stay stable before suggestions are fetched
    pub debounce: Duration,
    /// Freshness window for the document aggregator's cache
    pub cache_ttl: Duration,
    /// Directory for tracker persistence; `None` selects the no-op store
    pub storage_dir: Option<PathBuf>,
}

impl SearchConfig {
    /// Create a configuration pointing at the given API base URL
    ///
    /// # Errors
    ///
    /// Returns an error if `api_base` is not a valid absolute URL.
    pub fn new(api_base: &str) -> Result<Self> {
        let api_base = Url::parse(api_base)
            .with_context(|| format!("Invalid API base URL '{api_base}'"))?;
        Ok(Self {
            api_base,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            storage_dir: default_storage_dir(),
        })
    }

    /// Override the debounce interval
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Override the aggregator cache freshness window
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Override the tracker storage directory (`None` disables persistence)
    #[must_use]
    pub fn with_storage_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.storage_dir = dir;
        self
    }
}

/// Platform data directory for tracker state, when one resolves
#[must_use]
pub fn default_storage_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("mycosoft").join("search"))
}
