//! Search popularity tracking
//!
//! Records queries and result click-throughs, keeps a cumulative popularity
//! table (clicks count double a plain search), and derives related searches
//! from it. State is rehydrated from the store at construction and flushed
//! on every tracked event. Storage failures are logged and swallowed:
//! tracking is a best-effort enhancement, never a correctness requirement
//! of search itself.

pub mod store;

pub use store::{HISTORY_KEY, JsonFileStore, MetricStore, NoopStore, POPULAR_KEY};

use crate::config::SearchConfig;
use crate::model::SuggestionKind;
use chrono::Utc;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One recorded search event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMetric {
    /// Event time, milliseconds since the Unix epoch
    pub timestamp: i64,

    /// Normalized query (lowercased, trimmed)
    pub query: String,

    /// Set when the event is a result click rather than a plain search
    #[serde(rename = "resultClicked", skip_serializing_if = "Option::is_none")]
    pub result_clicked: Option<bool>,

    /// Category of the clicked result, when known
    #[serde(rename = "clickedType", skip_serializing_if = "Option::is_none")]
    pub clicked_kind: Option<SuggestionKind>,
}

/// Weight contributed by a plain search
pub const SEARCH_WEIGHT: u32 = 1;

/// Weight contributed by a result click
pub const CLICK_WEIGHT: u32 = 2;

/// Metrics older than this are dropped on cleanup
pub const METRIC_RETENTION_DAYS: i64 = 30;

/// Default number of entries returned by [`SearchTracker::top_searches`]
pub const DEFAULT_TOP_LIMIT: usize = 100;

/// Popularity tracker over an injected [`MetricStore`]
pub struct SearchTracker {
    store: Box<dyn MetricStore>,
    metrics: Vec<SearchMetric>,
    popular: HashMap<String, u32>,
}

impl SearchTracker {
    /// Create a tracker over the given store, rehydrating persisted state
    ///
    /// Unreadable or malformed persisted state is logged and treated as
    /// empty.
    #[must_use]
    pub fn new(store: Box<dyn MetricStore>) -> Self {
        let mut tracker = Self {
            store,
            metrics: Vec::new(),
            popular: HashMap::new(),
        };
        tracker.rehydrate();
        tracker
    }

    /// Create a tracker from configuration
    ///
    /// Selects the file store when a storage directory is configured and
    /// usable, the no-op store otherwise. Selection happens once, here.
    #[must_use]
    pub fn from_config(config: &SearchConfig) -> Self {
        let store: Box<dyn MetricStore> = match &config.storage_dir {
            Some(dir) => match JsonFileStore::create(dir.clone()) {
                Ok(store) => Box::new(store),
                Err(e) => {
                    warn!("Tracker storage unavailable, tracking in memory only: {e:#}");
                    Box::new(NoopStore)
                }
            },
            None => Box::new(NoopStore),
        };
        Self::new(store)
    }

    /// Record a plain search for `query` (weight 1)
    pub fn track_search(&mut self, query: &str) {
        let Some(normalized) = normalize_query(query) else {
            return;
        };
        self.metrics.push(SearchMetric {
            timestamp: Utc::now().timestamp_millis(),
            query: normalized.clone(),
            result_clicked: None,
            clicked_kind: None,
        });
        *self.popular.entry(normalized).or_insert(0) += SEARCH_WEIGHT;
        self.persist();
    }

    /// Record a result click for `query` (weight 2, double a plain search)
    pub fn track_result_click(&mut self, query: &str, kind: Option<SuggestionKind>) {
        let Some(normalized) = normalize_query(query) else {
            return;
        };
        self.metrics.push(SearchMetric {
            timestamp: Utc::now().timestamp_millis(),
            query: normalized.clone(),
            result_clicked: Some(true),
            clicked_kind: kind,
        });
        *self.popular.entry(normalized).or_insert(0) += CLICK_WEIGHT;
        self.persist();
    }

    /// Top tracked queries by descending weight, at most `limit` entries
    ///
    /// Ties break by query string so the ordering is deterministic.
    #[must_use]
    pub fn top_searches(&self, limit: usize) -> Vec<(String, u32)> {
        let mut entries: Vec<(String, u32)> = self
            .popular
            .iter()
            .map(|(q, w)| (q.clone(), *w))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(limit);
        entries
    }

    /// Tracked queries related to `query`, excluding `query` itself
    ///
    /// A candidate is related when either string contains the other or the
    /// two share a whitespace token. Candidates come from the top searches,
    /// so the result inherits their popularity ordering.
    #[must_use]
    pub fn related_searches(&self, query: &str, limit: usize) -> Vec<String> {
        let Some(normalized) = normalize_query(query) else {
            return Vec::new();
        };
        let tokens: Vec<&str> = normalized.split_whitespace().collect();

        self.top_searches(DEFAULT_TOP_LIMIT)
            .into_iter()
            .map(|(candidate, _)| candidate)
            .filter(|candidate| {
                candidate != &normalized
                    && (candidate.contains(&normalized)
                        || normalized.contains(candidate.as_str())
                        || candidate
                            .split_whitespace()
                            .any(|t| tokens.contains(&t)))
            })
            .take(limit)
            .collect()
    }

    /// Drop metrics older than the retention window and rewrite state
    pub fn cleanup(&mut self) {
        let cutoff =
            Utc::now().timestamp_millis() - METRIC_RETENTION_DAYS * 24 * 60 * 60 * 1000;
        let before = self.metrics.len();
        self.metrics.retain(|m| m.timestamp >= cutoff);
        let dropped = before - self.metrics.len();
        if dropped > 0 {
            debug!("Dropped {dropped} expired search metrics");
        }
        self.persist();
    }

    /// Number of recorded metrics (monitoring aid)
    #[must_use]
    pub fn metric_count(&self) -> usize {
        self.metrics.len()
    }

    fn rehydrate(&mut self) {
        match self.store.read(HISTORY_KEY) {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<SearchMetric>>(&payload) {
                Ok(metrics) => self.metrics = metrics,
                Err(e) => warn!("Ignoring malformed search history: {e}"),
            },
            Ok(None) => {}
            Err(e) => warn!("Failed to read search history: {e:#}"),
        }
        match self.store.read(POPULAR_KEY) {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<(String, u32)>>(&payload) {
                Ok(pairs) => self.popular = pairs.into_iter().collect(),
                Err(e) => warn!("Ignoring malformed popularity table: {e}"),
            },
            Ok(None) => {}
            Err(e) => warn!("Failed to read popularity table: {e:#}"),
        }
    }

    /// Flush both keys; failures are logged, never propagated
    fn persist(&self) {
        match serde_json::to_string(&self.metrics) {
            Ok(payload) => {
                if let Err(e) = self.store.write(HISTORY_KEY, &payload) {
                    warn!("Failed to persist search history: {e:#}");
                }
            }
            Err(e) => warn!("Failed to serialize search history: {e}"),
        }

        // Stored as [query, weight] pairs in popularity order
        let pairs = self.top_searches(usize::MAX);
        match serde_json::to_string(&pairs) {
            Ok(payload) => {
                if let Err(e) = self.store.write(POPULAR_KEY, &payload) {
                    warn!("Failed to persist popularity table: {e:#}");
                }
            }
            Err(e) => warn!("Failed to serialize popularity table: {e}"),
        }
    }
}

/// Normalize a query for tracking: trim and lowercase
///
/// Returns `None` for queries that are empty after trimming.
#[must_use]
pub fn normalize_query(query: &str) -> Option<String> {
    let normalized = query.trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}
