//! Wire models for the search backend and the response envelopes
//!
//! All network JSON is decoded against these types exactly once at the HTTP
//! boundary. The envelopes are untagged enums so a success body and an
//! `{ "error": ... }` body are distinguished by the decode itself; anything
//! matching neither shape is an invalid response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Path of the results endpoint, relative to the API base
pub const RESULTS_PATH: &str = "/api/search";

/// Path of the suggestions endpoint, relative to the API base
pub const SUGGESTIONS_PATH: &str = "/api/search/suggestions";

/// Minimum trimmed query length for suggestion fetches
pub const MIN_SUGGESTION_QUERY_LEN: usize = 2;

/// Category of a search suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Fungi,
    Article,
    Compound,
    Research,
}

/// A lightweight, typed autocomplete entry shown as the user types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSuggestion {
    pub id: String,

    pub title: String,

    /// Suggestion category
    #[serde(rename = "type")]
    pub kind: SuggestionKind,

    /// Latin binomial, when the suggestion is a species
    #[serde(rename = "scientificName", skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,

    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A full search hit shown on the results page
///
/// `id`, `title`, `type`, and `url` are required strings; entries missing
/// any of them fail the per-item decode and are dropped before display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,

    pub title: String,

    #[serde(rename = "type")]
    pub result_type: String,

    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Envelope of `GET /api/search`
///
/// Items are kept as raw JSON so that one malformed entry is dropped
/// individually instead of failing the whole decode.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ResultsResponse {
    Failure { error: String },
    Success { results: Vec<Value> },
}

/// Envelope of `GET /api/search/suggestions`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SuggestionsResponse {
    Failure {
        error: String,
    },
    Success {
        suggestions: Vec<Value>,
        #[serde(default)]
        message: Option<String>,
    },
}
