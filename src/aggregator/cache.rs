//! Query-keyed cache for aggregated documents
//!
//! A fresh entry (within the configured window) short-circuits the whole
//! source fan-out. The in-memory implementation bounds the table with LRU
//! eviction and treats staleness as absence, removing expired entries on
//! read.

use super::AggregatedDocument;
use anyhow::{Context, Result};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// Maximum cached queries before LRU eviction
const CACHE_CAPACITY: usize = 256;

/// Cache store for merged document lists
///
/// Errors from either operation propagate to the aggregation caller,
/// unlike individual source failures.
pub trait DocumentCache: Send + Sync {
    /// Fresh documents for `query`, if a live entry exists
    fn get(&self, query: &str) -> Result<Option<Vec<AggregatedDocument>>>;

    /// Store the merged list for `query` with a fresh timestamp
    fn put(&self, query: &str, documents: Vec<AggregatedDocument>) -> Result<()>;
}

struct CacheEntry {
    documents: Vec<AggregatedDocument>,
    stored_at: Instant,
}

/// Bounded in-memory cache with a freshness window
pub struct MemoryDocumentCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
}

impl MemoryDocumentCache {
    /// Create a cache whose entries stay fresh for `ttl`
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(
                NonZeroUsize::new(CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            )),
            ttl,
        }
    }
}

impl DocumentCache for MemoryDocumentCache {
    fn get(&self, query: &str) -> Result<Option<Vec<AggregatedDocument>>> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("Document cache lock poisoned"))
            .context("Cache read failed")?;

        let expired = match entries.get(query) {
            Some(entry) => {
                if entry.stored_at.elapsed() < self.ttl {
                    debug!(query, "Document cache hit");
                    return Ok(Some(entry.documents.clone()));
                }
                true
            }
            None => false,
        };
        if expired {
            debug!(query, "Document cache entry expired");
            entries.pop(query);
        }
        Ok(None)
    }

    fn put(&self, query: &str, documents: Vec<AggregatedDocument>) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("Document cache lock poisoned"))
            .context("Cache write failed")?;
        entries.put(
            query.to_string(),
            CacheEntry {
                documents,
                stored_at: Instant::now(),
            },
        );
        Ok(())
    }
}
