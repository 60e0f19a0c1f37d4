use crate::recipe::{RankedResult, Recipe};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Resolves a document id to its recipe. Snippets and ingredient ranking read through this.
pub trait DocumentLookup {
    fn document(&self, id: &str) -> Option<&Recipe>;
}

impl DocumentLookup for HashMap<String, Recipe> {
    fn document(&self, id: &str) -> Option<&Recipe> { self.get(id) }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub area: Option<String>,
    pub limit: Option<usize>,
}

/// Validated recipes in corpus order, addressable by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
    by_id: HashMap<String, usize>,
}

fn is_listable(value: &str) -> bool { !value.trim().is_empty() && value != "N/A" }

impl RecipeCatalog {
    /// Ids must already be unique; the builder guarantees that.
    pub(crate) fn from_recipes(recipes: Vec<Recipe>) -> Self {
        let by_id = recipes.iter().enumerate().map(|(i, r)| (r.id.clone(), i)).collect();
        Self { recipes, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> { self.by_id.get(id).and_then(|&i| self.recipes.get(i)) }

    /// Every recipe must be reachable through its own id, used after loading a persisted catalog.
    pub fn validate(&self) -> Result<(), String> {
        if self.by_id.len() != self.recipes.len() {
            return Err(format!("catalog has {} recipes but {} ids", self.recipes.len(), self.by_id.len()));
        }
        for (i, recipe) in self.recipes.iter().enumerate() {
            if self.by_id.get(&recipe.id) != Some(&i) {
                return Err(format!("recipe {:?} is not indexed at position {i}", recipe.id));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize { self.recipes.len() }

    pub fn is_empty(&self) -> bool { self.recipes.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> + '_ { self.recipes.iter() }

    pub fn list(&self, filter: &CatalogFilter) -> Vec<&Recipe> {
        let matching = self.recipes.iter().filter(|r| {
            filter.category.as_deref().map_or(true, |c| r.category.as_deref() == Some(c))
                && filter.area.as_deref().map_or(true, |a| r.area.as_deref() == Some(a))
        });
        match filter.limit {
            Some(n) => matching.take(n).collect(),
            None => matching.collect(),
        }
    }

    pub fn categories(&self) -> Vec<String> {
        self.recipes
            .iter()
            .filter_map(|r| r.category.as_deref())
            .filter(|c| is_listable(c))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn areas(&self) -> Vec<String> {
        self.recipes
            .iter()
            .filter_map(|r| r.area.as_deref())
            .filter(|a| is_listable(a))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// First `limit` recipes in corpus order, each with score 1.0.
    pub fn popular(&self, limit: usize) -> Vec<RankedResult> {
        self.recipes.iter().take(limit).map(|r| RankedResult::from_recipe(r, 1.0)).collect()
    }
}

impl DocumentLookup for RecipeCatalog {
    fn document(&self, id: &str) -> Option<&Recipe> { self.get(id) }
}
