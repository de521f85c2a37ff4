//! External document sources
//!
//! Three thin HTTP clients over the external collaborators: a literature
//! works endpoint and two taxonomic databases. Each decodes its own native
//! JSON shape and normalizes it into [`AggregatedDocument`], tagging the
//! document kind and a source-prefixed id so ids never collide across
//! sources.

use super::{AggregatedDocument, DocumentKind, DocumentSource};
use anyhow::{Context, Result};
use chrono::Utc;
use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

/// Literature works source (research articles)
pub struct LiteratureSource {
    http: reqwest::Client,
    base: Url,
}

#[derive(Debug, Deserialize)]
struct LiteratureEnvelope {
    articles: Vec<LiteratureRecord>,
}

/// Native shape of a literature record
#[derive(Debug, Deserialize)]
struct LiteratureRecord {
    doi: String,
    title: String,
    #[serde(default, rename = "abstract")]
    abstract_text: Option<String>,
    #[serde(default)]
    journal: Option<String>,
    #[serde(default)]
    year: Option<i32>,
}

impl LiteratureSource {
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }
}

impl DocumentSource for LiteratureSource {
    fn name(&self) -> &'static str {
        "literature"
    }

    fn fetch<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<AggregatedDocument>>> {
        Box::pin(async move {
            let mut url = self.base.clone();
            url.set_path("/works");
            url.query_pairs_mut().append_pair("query", query);

            let envelope: LiteratureEnvelope = self
                .http
                .get(url)
                .send()
                .await
                .context("Literature request failed")?
                .error_for_status()
                .context("Literature request rejected")?
                .json()
                .await
                .context("Literature response malformed")?;

            debug!(count = envelope.articles.len(), "Literature source resolved");

            Ok(envelope
                .articles
                .into_iter()
                .map(|article| AggregatedDocument {
                    id: format!("literature-{}", article.doi),
                    title: article.title,
                    content: article.abstract_text.unwrap_or_default(),
                    source: self.name().to_string(),
                    kind: DocumentKind::Research,
                    metadata: json!({
                        "doi": article.doi,
                        "journal": article.journal,
                        "year": article.year,
                    }),
                    last_updated: Utc::now(),
                })
                .collect())
        })
    }
}

/// Taxa autocomplete source (first taxonomic database)
pub struct TaxaSource {
    http: reqwest::Client,
    base: Url,
}

#[derive(Debug, Deserialize)]
struct TaxaEnvelope {
    results: Vec<TaxonRecord>,
}

/// Native shape of a taxon record
#[derive(Debug, Deserialize)]
struct TaxonRecord {
    id: u64,
    name: String,
    #[serde(default)]
    preferred_common_name: Option<String>,
    #[serde(default)]
    rank: Option<String>,
    #[serde(default)]
    wikipedia_summary: Option<String>,
}

impl TaxaSource {
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }
}

impl DocumentSource for TaxaSource {
    fn name(&self) -> &'static str {
        "taxa"
    }

    fn fetch<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<AggregatedDocument>>> {
        Box::pin(async move {
            let mut url = self.base.clone();
            url.set_path("/v1/taxa/autocomplete");
            url.query_pairs_mut().append_pair("q", query);

            let envelope: TaxaEnvelope = self
                .http
                .get(url)
                .send()
                .await
                .context("Taxa request failed")?
                .error_for_status()
                .context("Taxa request rejected")?
                .json()
                .await
                .context("Taxa response malformed")?;

            debug!(count = envelope.results.len(), "Taxa source resolved");

            Ok(envelope
                .results
                .into_iter()
                .map(|taxon| AggregatedDocument {
                    id: format!("taxa-{}", taxon.id),
                    title: taxon
                        .preferred_common_name
                        .clone()
                        .unwrap_or_else(|| taxon.name.clone()),
                    content: taxon.wikipedia_summary.unwrap_or_default(),
                    source: self.name().to_string(),
                    kind: DocumentKind::Taxonomy,
                    metadata: json!({
                        "scientificName": taxon.name,
                        "commonName": taxon.preferred_common_name,
                        "rank": taxon.rank,
                    }),
                    last_updated: Utc::now(),
                })
                .collect())
        })
    }
}

/// Species match source (second taxonomic database)
pub struct SpeciesSource {
    http: reqwest::Client,
    base: Url,
}

#[derive(Debug, Deserialize)]
struct SpeciesEnvelope {
    results: Vec<SpeciesRecord>,
}

/// Native shape of a species record
#[derive(Debug, Deserialize)]
struct SpeciesRecord {
    key: u64,
    #[serde(rename = "scientificName")]
    scientific_name: String,
    #[serde(default, rename = "vernacularName")]
    vernacular_name: Option<String>,
    #[serde(default)]
    kingdom: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl SpeciesSource {
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }
}

impl DocumentSource for SpeciesSource {
    fn name(&self) -> &'static str {
        "species"
    }

    fn fetch<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<AggregatedDocument>>> {
        Box::pin(async move {
            let mut url = self.base.clone();
            url.set_path("/species/search");
            url.query_pairs_mut().append_pair("q", query);

            let envelope: SpeciesEnvelope = self
                .http
                .get(url)
                .send()
                .await
                .context("Species request failed")?
                .error_for_status()
                .context("Species request rejected")?
                .json()
                .await
                .context("Species response malformed")?;

            debug!(count = envelope.results.len(), "Species source resolved");

            Ok(envelope
                .results
                .into_iter()
                .map(|species| AggregatedDocument {
                    id: format!("species-{}", species.key),
                    title: species
                        .vernacular_name
                        .clone()
                        .unwrap_or_else(|| species.scientific_name.clone()),
                    content: species.description.unwrap_or_default(),
                    source: self.name().to_string(),
                    kind: DocumentKind::Taxonomy,
                    metadata: json!({
                        "scientificName": species.scientific_name,
                        "vernacularName": species.vernacular_name,
                        "kingdom": species.kingdom,
                    }),
                    last_updated: Utc::now(),
                })
                .collect())
        })
    }
}
