//! Interactive search session
//!
//! Owns the observable state a search UI binds to (`query`,
//! `debounced_query`, `results`, `suggestions`, `is_loading`, `error`) and
//! the supersession discipline: every fetch takes a fresh generation, and
//! a run whose generation is no longer current discards its outcome,
//! success or failure alike, without touching state. Supersession is not
//! an error and never populates `error`.

use crate::client::SearchClient;
use crate::config::SearchConfig;
use crate::debounce::{Debounced, Debouncer};
use crate::fuzzy::{MAX_DISPLAYED_TERMS, SimilarTerm, TermDictionary};
use crate::model::{SearchResult, SearchSuggestion, SuggestionKind};
use crate::tracker::SearchTracker;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

/// Snapshot of session state, cheap to clone out to a UI
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Raw query as typed
    pub query: String,
    /// Query after the debounce interval settled
    pub debounced_query: String,
    pub results: Vec<SearchResult>,
    pub suggestions: Vec<SearchSuggestion>,
    pub is_loading: bool,
    /// User-facing error message, when the last fetch failed
    pub error: Option<String>,
}

/// Search session tying together client, tracker, and fuzzy fallback
pub struct SearchSession {
    client: SearchClient,
    tracker: Arc<Mutex<SearchTracker>>,
    dictionary: TermDictionary,
    state: Arc<Mutex<SearchState>>,
    /// Raw query input; settled values drive the suggestions fetches
    suggest_input: Debouncer<String>,
    /// Current suggestions fetch; older generations discard their outcome
    suggest_generation: Arc<AtomicU64>,
    /// Current results fetch
    search_generation: Arc<AtomicU64>,
}

impl SearchSession {
    /// Create a session from configuration
    ///
    /// Spawns the suggestion driver task, so the session must be created
    /// within a tokio runtime. The driver runs for the session's lifetime.
    #[must_use]
    pub fn new(config: &SearchConfig) -> Arc<Self> {
        Self::with_parts(
            config,
            SearchTracker::from_config(config),
            TermDictionary::default(),
        )
    }

    /// Session with an injected tracker and dictionary, for composition
    #[must_use]
    pub fn with_parts(
        config: &SearchConfig,
        tracker: SearchTracker,
        dictionary: TermDictionary,
    ) -> Arc<Self> {
        let (suggest_input, settled) = Debouncer::channel(config.debounce);
        let session = Arc::new(Self {
            client: SearchClient::new(config),
            tracker: Arc::new(Mutex::new(tracker)),
            dictionary,
            state: Arc::new(Mutex::new(SearchState::default())),
            suggest_input,
            suggest_generation: Arc::new(AtomicU64::new(0)),
            search_generation: Arc::new(AtomicU64::new(0)),
        });
        session.spawn_suggestion_driver(settled);
        session
    }

    /// Consume settled queries and fan each into its own fetch
    ///
    /// The generation is taken as soon as a value settles, so an in-flight
    /// fetch for an older query is superseded even while its response is
    /// still pending. Holds only a weak handle: dropping the last session
    /// reference closes the channel and ends the task.
    fn spawn_suggestion_driver(self: &Arc<Self>, mut settled: Debounced<String>) {
        let weak = Arc::downgrade(self);
        tokio::spawn(async move {
            while let Some(query) = settled.recv().await {
                let Some(session) = weak.upgrade() else { break };
                let generation = session.next_suggest_generation();
                tokio::spawn(async move {
                    {
                        let mut state = session.state.lock().await;
                        state.debounced_query = query.clone();
                    }
                    session.run_suggestions(&query, generation).await;
                });
            }
        });
    }

    /// Current state snapshot
    pub async fn state(&self) -> SearchState {
        self.state.lock().await.clone()
    }

    /// Update the typed query; suggestions fetch after the input settles
    ///
    /// Only the final value of a typing burst is fetched, and only the
    /// newest run's outcome is ever applied.
    pub async fn set_query(&self, query: &str) {
        {
            let mut state = self.state.lock().await;
            state.query = query.to_string();
        }
        self.suggest_input.push(query.to_string());
    }

    /// Fetch suggestions for `query` under the given generation
    ///
    /// Exposed for driving the session without the debounce timer; callers
    /// normally go through [`SearchSession::set_query`].
    pub async fn run_suggestions(&self, query: &str, generation: u64) {
        if query.trim().is_empty() {
            let mut state = self.state.lock().await;
            if self.suggest_generation.load(Ordering::SeqCst) == generation {
                state.suggestions.clear();
                state.error = None;
                // A superseded fetch may still be pending; it will never
                // get to clear the flag itself
                state.is_loading = false;
            }
            return;
        }

        {
            let mut state = self.state.lock().await;
            if self.suggest_generation.load(Ordering::SeqCst) != generation {
                return;
            }
            state.is_loading = true;
        }

        let outcome = self.client.fetch_suggestions(query).await;

        let mut state = self.state.lock().await;
        if self.suggest_generation.load(Ordering::SeqCst) != generation {
            // Superseded while in flight; leave state to the newer run
            debug!(query, "Discarding superseded suggestions outcome");
            return;
        }
        state.is_loading = false;
        match outcome {
            Ok(suggestions) => {
                state.suggestions = suggestions;
                state.error = None;
            }
            Err(e) => {
                state.suggestions.clear();
                state.error = Some(e.user_message());
            }
        }
    }

    /// Allocate a fresh suggestions generation, superseding pending runs
    #[must_use]
    pub fn next_suggest_generation(&self) -> u64 {
        self.suggest_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Run a full search for `query`
    ///
    /// A blank query clears results and error without a fetch. On success
    /// the query is recorded with the popularity tracker.
    pub async fn search(&self, query: &str) {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            // Supersede any fetch still in flight before clearing
            self.search_generation.fetch_add(1, Ordering::SeqCst);
            let mut state = self.state.lock().await;
            state.results.clear();
            state.error = None;
            state.is_loading = false;
            return;
        }

        let generation = self.search_generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().await;
            state.is_loading = true;
            state.error = None;
        }

        let outcome = self.client.fetch_results(trimmed).await;

        let mut state = self.state.lock().await;
        if self.search_generation.load(Ordering::SeqCst) != generation {
            debug!(query = trimmed, "Discarding superseded results outcome");
            return;
        }
        state.is_loading = false;
        match outcome {
            Ok(results) => {
                state.results = results;
                state.error = None;
                drop(state);
                self.tracker.lock().await.track_search(trimmed);
            }
            Err(e) => {
                state.results.clear();
                state.error = Some(e.user_message());
            }
        }
    }

    /// Record a click-through on a result for `query`
    pub async fn record_click(&self, query: &str, kind: Option<SuggestionKind>) {
        self.tracker.lock().await.track_result_click(query, kind);
    }

    /// Queries related to `query`, from the popularity tracker
    pub async fn related_searches(&self, query: &str, limit: usize) -> Vec<String> {
        self.tracker.lock().await.related_searches(query, limit)
    }

    /// Fuzzy candidates for the current query, for the zero-results state
    pub async fn did_you_mean(&self) -> Vec<SimilarTerm> {
        let query = self.state.lock().await.query.clone();
        self.dictionary
            .find_similar_terms(&query, MAX_DISPLAYED_TERMS)
    }

    /// Drop pending fetches and clear state (the unmount analog)
    pub async fn reset(&self) {
        self.suggest_generation.fetch_add(1, Ordering::SeqCst);
        self.search_generation.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().await;
        *state = SearchState::default();
    }
}

impl SearchState {
    /// True when the session is idle with no results, suggestions, or error
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.is_loading
            && self.results.is_empty()
            && self.suggestions.is_empty()
            && self.error.is_none()
    }
}
