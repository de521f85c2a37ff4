//! "Did you mean" candidates for zero-result queries
//!
//! Compares a query against a dictionary of known species, common names,
//! compounds, and categories using Levenshtein distance, with substring
//! containment accepted regardless of distance. Comparison is
//! case-insensitive and ordering is deterministic: distance ascending,
//! ties by dictionary order.

use crate::model::SuggestionKind;
use once_cell::sync::Lazy;
use strsim::levenshtein;

/// Candidates shown in the UI; the matcher itself may return more
pub const MAX_DISPLAYED_TERMS: usize = 5;

/// A dictionary term with its suggestion category
#[derive(Debug, Clone)]
pub struct TermEntry {
    pub term: String,
    pub kind: SuggestionKind,
}

/// A ranked "did you mean" candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarTerm {
    pub term: String,
    pub kind: SuggestionKind,
}

/// Ordered dictionary of known terms
#[derive(Clone)]
pub struct TermDictionary {
    entries: Vec<TermEntry>,
}

impl TermDictionary {
    /// Build a dictionary from `(term, kind)` pairs, preserving order
    #[must_use]
    pub fn new(entries: Vec<(&str, SuggestionKind)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(term, kind)| TermEntry {
                    term: term.to_string(),
                    kind,
                })
                .collect(),
        }
    }

    /// Terms similar to `query`, best match first, at most `limit` entries
    ///
    /// A term qualifies when its edit distance to the query is within the
    /// query-length-scaled threshold, or when either string contains the
    /// other. Ranking is by edit distance; the stable sort keeps dictionary
    /// order for ties.
    #[must_use]
    pub fn find_similar_terms(&self, query: &str, limit: usize) -> Vec<SimilarTerm> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        let threshold = max_distance_for(&query);

        let mut scored: Vec<(usize, &TermEntry)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let term = entry.term.to_lowercase();
                if term == query {
                    return None;
                }
                let distance = levenshtein(&query, &term);
                if distance <= threshold || term.contains(&query) || query.contains(&term) {
                    Some((distance, entry))
                } else {
                    None
                }
            })
            .collect();

        scored.sort_by_key(|(distance, _)| *distance);
        scored
            .into_iter()
            .take(limit)
            .map(|(_, entry)| SimilarTerm {
                term: entry.term.clone(),
                kind: entry.kind,
            })
            .collect()
    }
}

impl Default for TermDictionary {
    /// Dictionary seeded with the catalog's species, compounds, and
    /// categories
    fn default() -> Self {
        DEFAULT_TERMS.clone()
    }
}

/// Edit-distance threshold scaled to query length
///
/// Short queries tolerate two edits (matching common one-typo input);
/// longer queries a third of their length.
fn max_distance_for(query: &str) -> usize {
    (query.chars().count() / 3).max(2)
}

static DEFAULT_TERMS: Lazy<TermDictionary> = Lazy::new(|| {
    use SuggestionKind::{Article, Compound, Fungi, Research};
    TermDictionary::new(vec![
        ("lion's mane", Fungi),
        ("hericium erinaceus", Fungi),
        ("reishi", Fungi),
        ("ganoderma lucidum", Fungi),
        ("turkey tail", Fungi),
        ("trametes versicolor", Fungi),
        ("cordyceps", Fungi),
        ("cordyceps militaris", Fungi),
        ("chaga", Fungi),
        ("inonotus obliquus", Fungi),
        ("shiitake", Fungi),
        ("lentinula edodes", Fungi),
        ("oyster mushroom", Fungi),
        ("pleurotus ostreatus", Fungi),
        ("maitake", Fungi),
        ("grifola frondosa", Fungi),
        ("agarikon", Fungi),
        ("fomitopsis officinalis", Fungi),
        ("hericenone", Compound),
        ("erinacine", Compound),
        ("ganoderic acid", Compound),
        ("beta-glucan", Compound),
        ("ergothioneine", Compound),
        ("psilocybin", Compound),
        ("cordycepin", Compound),
        ("mycelium", Article),
        ("mushroom cultivation", Article),
        ("medicinal mushrooms", Article),
        ("mycoremediation", Research),
        ("fungal networks", Research),
        ("biomaterials", Research),
    ])
});
