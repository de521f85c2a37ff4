//! Search, suggestion, and document-aggregation layer for the Mycosoft
//! species and research catalog.
//!
//! The crate covers the interactive search path end to end: debounced
//! query input, suggestion and result fetches with per-item validation and
//! supersession-safe cancellation, best-effort popularity tracking with
//! related-search derivation, fuzzy "did you mean" candidates for
//! zero-result queries, and a cached fan-out aggregator over external
//! literature and taxonomy sources.

pub mod aggregator;
pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod fuzzy;
pub mod model;
pub mod session;
pub mod tracker;

pub use aggregator::{
    AggregatedDocument, DocumentAggregator, DocumentCache, DocumentKind, DocumentSource,
    MemoryDocumentCache,
};
pub use client::SearchClient;
pub use config::SearchConfig;
pub use debounce::{Debounced, Debouncer};
pub use error::SearchError;
pub use fuzzy::{MAX_DISPLAYED_TERMS, SimilarTerm, TermDictionary};
pub use model::{SearchResult, SearchSuggestion, SuggestionKind};
pub use session::{SearchSession, SearchState};
pub use tracker::{MetricStore, SearchMetric, SearchTracker};
