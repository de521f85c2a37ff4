//! Document aggregation across external sources
//!
//! Fans a query out to the configured sources concurrently, normalizes
//! their native shapes into one document record, and caches the merged
//! list per query. Individual source failures are isolated (a failed
//! source contributes zero documents) while cache failures and anything
//! else unexpected propagate to the caller.

pub mod cache;
pub mod sources;

pub use cache::{DocumentCache, MemoryDocumentCache};
pub use sources::{LiteratureSource, SpeciesSource, TaxaSource};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, join_all};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Kind tag of an aggregated document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Research,
    Taxonomy,
    Observation,
}

/// A normalized record combining heterogeneous source data under one shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedDocument {
    /// Source-prefixed id, collision-safe across sources
    pub id: String,

    pub title: String,

    pub content: String,

    /// Name of the contributing source
    pub source: String,

    #[serde(rename = "type")]
    pub kind: DocumentKind,

    pub metadata: Value,

    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
}

/// An external document source
///
/// Implementations fetch their native records for a query and return them
/// already normalized. Failures here are isolated by the aggregator.
pub trait DocumentSource: Send + Sync {
    /// Short name used for id prefixes and logging
    fn name(&self) -> &'static str;

    /// Fetch and normalize documents for `query`
    fn fetch<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<AggregatedDocument>>>;
}

/// Aggregator over a set of sources and a query cache
pub struct DocumentAggregator {
    sources: Vec<Arc<dyn DocumentSource>>,
    cache: Arc<dyn DocumentCache>,
}

impl DocumentAggregator {
    /// Create an aggregator over the given sources and cache
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn DocumentSource>>, cache: Arc<dyn DocumentCache>) -> Self {
        Self { sources, cache }
    }

    /// Aggregator with the three standard sources against one API root
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not a valid URL.
    pub fn standard(base: &str, cache_ttl: Duration) -> Result<Self> {
        let base = Url::parse(base).with_context(|| format!("Invalid source base '{base}'"))?;
        Ok(Self::new(
            vec![
                Arc::new(LiteratureSource::new(base.clone())),
                Arc::new(TaxaSource::new(base.clone())),
                Arc::new(SpeciesSource::new(base)),
            ],
            Arc::new(MemoryDocumentCache::new(cache_ttl)),
        ))
    }

    /// Normalized documents for `query`, cached per exact query string
    ///
    /// A fresh cache entry bypasses every source call. Otherwise all
    /// sources run concurrently; the fan-out waits for every outcome and
    /// never fails fast, so one rejected source only costs its own
    /// documents.
    ///
    /// # Errors
    ///
    /// Propagates cache read/write failures and any unexpected error
    /// outside the isolated source calls.
    pub async fn aggregate(&self, query: &str) -> Result<Vec<AggregatedDocument>> {
        if let Some(cached) = self.cache.get(query).context("Document cache lookup failed")? {
            return Ok(cached);
        }

        let fetches = self.sources.iter().map(|source| {
            let name = source.name();
            async move { (name, source.fetch(query).await) }
        });

        let mut merged = Vec::new();
        for (name, outcome) in join_all(fetches).await {
            match outcome {
                Ok(documents) => {
                    debug!(source = name, count = documents.len(), "Source contributed");
                    merged.extend(documents);
                }
                Err(e) => {
                    // Isolated: a failed source contributes zero documents
                    warn!(source = name, "Source failed, continuing without it: {e:#}");
                }
            }
        }

        self.cache
            .put(query, merged.clone())
            .context("Document cache store failed")?;

        Ok(merged)
    }
}
