//! HTTP client for the search backend
//!
//! Issues the results and suggestions fetches, decodes each body against
//! its envelope once at the boundary, and validates entries individually:
//! a malformed entry is dropped and logged while the rest of the payload
//! survives.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::model::{
    MIN_SUGGESTION_QUERY_LEN, RESULTS_PATH, ResultsResponse, SUGGESTIONS_PATH, SearchResult,
    SearchSuggestion, SuggestionsResponse,
};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Client for the search and suggestions endpoints
#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    api_base: Url,
}

impl SearchClient {
    /// Create a client against the configured API base
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.clone(),
        }
    }

    /// Fetch full search results for `query`
    ///
    /// A blank query short-circuits to an empty list without touching the
    /// network. Only entries satisfying the validity invariant (`id`,
    /// `title`, `type`, `url` present strings) are returned; the rest are
    /// dropped individually.
    pub async fn fetch_results(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.endpoint(RESULTS_PATH, query);
        debug!(%url, "Fetching search results");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::from_status(status));
        }

        let envelope: ResultsResponse = response
            .json()
            .await
            .map_err(|_| SearchError::InvalidResponse)?;

        match envelope {
            ResultsResponse::Failure { error } => Err(SearchError::Api(error)),
            ResultsResponse::Success { results } => {
                Ok(decode_entries(results, "search result"))
            }
        }
    }

    /// Fetch autocomplete suggestions for `query`
    ///
    /// Queries under two trimmed characters are rejected without a network
    /// call. Invalid suggestions are discarded and logged individually;
    /// the valid remainder is returned (partial success, not
    /// all-or-nothing).
    pub async fn fetch_suggestions(
        &self,
        query: &str,
    ) -> Result<Vec<SearchSuggestion>, SearchError> {
        let query = query.trim();
        if query.chars().count() < MIN_SUGGESTION_QUERY_LEN {
            return Err(SearchError::QueryTooShort);
        }

        let url = self.endpoint(SUGGESTIONS_PATH, query);
        debug!(%url, "Fetching suggestions");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::from_status(status));
        }

        let envelope: SuggestionsResponse = response
            .json()
            .await
            .map_err(|_| SearchError::InvalidResponse)?;

        match envelope {
            SuggestionsResponse::Failure { error } => Err(SearchError::Api(error)),
            SuggestionsResponse::Success {
                suggestions,
                message,
            } => {
                if let Some(message) = message {
                    debug!(%message, "Suggestions endpoint note");
                }
                Ok(decode_entries(suggestions, "suggestion"))
            }
        }
    }

    /// Build an endpoint URL with the query encoded exactly once
    fn endpoint(&self, path: &str, query: &str) -> Url {
        let mut url = self.api_base.clone();
        url.set_path(path);
        url.query_pairs_mut().append_pair("q", query);
        url
    }
}

/// Decode raw entries one by one, dropping and logging the invalid
fn decode_entries<T: serde::de::DeserializeOwned>(raw: Vec<Value>, what: &str) -> Vec<T> {
    raw.into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Dropping invalid {what}: {e}");
                None
            }
        })
        .collect()
}
