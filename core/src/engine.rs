use crate::catalog::DocumentLookup;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::index::IndexArtifact;
use crate::ingredients::{matches_any_ingredient, rank_by_ingredients};
use crate::query::vectorize_query;
use crate::rank::{rank, rank_with_deadline, Scored};
use crate::recipe::{RankedResult, Recipe};
use crate::snippet;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Text search plus the optional post-filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_k")]
    pub top_k: usize,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Best-effort limit on the scoring scan.
    #[serde(skip)]
    pub deadline: Option<Instant>,
}
fn default_k() -> usize { 10 }

impl SearchRequest {
    pub fn new(query: impl Into<String>, top_k: usize) -> Self {
        Self { query: query.into(), top_k, category: None, area: None, ingredients: Vec::new(), deadline: None }
    }
}

/// Query-time entry points over one artifact and its document lookup.
pub struct Engine<'a, L: DocumentLookup + ?Sized> {
    artifact: &'a IndexArtifact,
    lookup: &'a L,
    config: &'a EngineConfig,
}

impl<'a, L: DocumentLookup + ?Sized> Engine<'a, L> {
    pub fn new(artifact: &'a IndexArtifact, lookup: &'a L, config: &'a EngineConfig) -> Self {
        Self { artifact, lookup, config }
    }

    fn resolve(&self, hit: &Scored) -> Result<&'a Recipe> {
        let id = self
            .artifact
            .doc_id(hit.pos)
            .ok_or_else(|| Error::Corrupt(format!("ranked position {} has no document id", hit.pos)))?;
        self.lookup.document(id).ok_or_else(|| Error::DocumentNotFound(id.to_string()))
    }

    fn materialize(&self, hits: &[Scored], snippet_query: &str) -> Result<Vec<RankedResult>> {
        hits.iter()
            .map(|hit| {
                let recipe = self.resolve(hit)?;
                let mut result = RankedResult::from_recipe(recipe, hit.score);
                result.snippet = Some(snippet::extract(recipe, snippet_query, self.config));
                Ok(result)
            })
            .collect()
    }

    /// TF-IDF cosine ranking. A blank query is zero results, not an error.
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<RankedResult>> {
        self.search_scan(query, top_k, None)
    }

    fn search_scan(&self, query: &str, top_k: usize, deadline: Option<Instant>) -> Result<Vec<RankedResult>> {
        if query.trim().is_empty() {
            tracing::debug!("blank query, no results");
            return Ok(Vec::new());
        }
        let qv = vectorize_query(self.artifact, query);
        let hits = match deadline {
            Some(d) => rank_with_deadline(self.artifact, &qv, top_k, d)?,
            None => rank(self.artifact, &qv, top_k),
        };
        self.materialize(&hits, query)
    }

    /// Ingredient-overlap ranking, independent of the TF-IDF vectors.
    pub fn search_by_ingredients(&self, ingredients: &[String], top_k: usize) -> Result<Vec<RankedResult>> {
        let hits = rank_by_ingredients(self.artifact, self.lookup, ingredients, top_k)?;
        self.materialize(&hits, &ingredients.join(" "))
    }

    /// Text search, then exact category/area filters and the any-ingredient gate.
    /// Filters run after the top-k cut, so fewer than `top_k` results may come back.
    pub fn search_filtered(&self, request: &SearchRequest) -> Result<Vec<RankedResult>> {
        let results = self.search_scan(&request.query, request.top_k, request.deadline)?;
        let mut kept = Vec::with_capacity(results.len());
        for r in results {
            if let Some(c) = &request.category {
                if r.category.as_ref() != Some(c) { continue; }
            }
            if let Some(a) = &request.area {
                if r.area.as_ref() != Some(a) { continue; }
            }
            if !request.ingredients.is_empty() {
                let recipe = self.lookup.document(&r.id).ok_or_else(|| Error::DocumentNotFound(r.id.clone()))?;
                if !matches_any_ingredient(recipe, &request.ingredients) { continue; }
            }
            kept.push(r);
        }
        Ok(kept)
    }
}

/// Rank `artifact` against `query`, attaching snippets.
pub fn search<L: DocumentLookup + ?Sized>(artifact: &IndexArtifact, lookup: &L, query: &str, top_k: usize) -> Result<Vec<RankedResult>> {
    let config = EngineConfig::default();
    Engine::new(artifact, lookup, &config).search(query, top_k)
}

/// Rank `artifact` by ingredient overlap, attaching snippets.
pub fn search_by_ingredients<L: DocumentLookup + ?Sized>(
    artifact: &IndexArtifact,
    lookup: &L,
    ingredients: &[String],
    top_k: usize,
) -> Result<Vec<RankedResult>> {
    let config = EngineConfig::default();
    Engine::new(artifact, lookup, &config).search_by_ingredients(ingredients, top_k)
}
