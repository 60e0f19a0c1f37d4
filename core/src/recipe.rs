use crate::error::Malformed;
use serde::{Deserialize, Serialize};

/// A recipe as it arrives from the acquisition side, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub image: Option<String>,
    pub ingredients: Vec<String>,
}

impl Recipe {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: None,
            area: None,
            instructions: None,
            image: None,
            ingredients: Vec::new(),
        }
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    /// Ingredient list joined with `sep`; the text ingredient matching runs against.
    pub fn joined_ingredients(&self, sep: &str) -> String {
        self.ingredients.join(sep)
    }
}

impl TryFrom<RecipeRecord> for Recipe {
    type Error = Malformed;

    fn try_from(rec: RecipeRecord) -> Result<Self, Self::Error> {
        let id = rec.id.filter(|s| !s.trim().is_empty()).ok_or(Malformed::MissingId)?;
        let title = rec.title.filter(|s| !s.trim().is_empty()).ok_or(Malformed::MissingTitle)?;
        Ok(Recipe {
            id,
            title,
            category: rec.category,
            area: rec.area,
            instructions: rec.instructions,
            image: rec.image,
            ingredients: rec.ingredients,
        })
    }
}

impl From<Recipe> for RecipeRecord {
    fn from(r: Recipe) -> Self {
        RecipeRecord {
            id: Some(r.id),
            title: Some(r.title),
            category: r.category,
            area: r.area,
            instructions: r.instructions,
            image: r.image,
            ingredients: r.ingredients,
        }
    }
}

/// One hit, shared by every ranking path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub id: String,
    pub title: String,
    pub score: f32,
    pub category: Option<String>,
    pub area: Option<String>,
    pub image: Option<String>,
    pub snippet: Option<String>,
}

impl RankedResult {
    pub fn from_recipe(recipe: &Recipe, score: f32) -> Self {
        Self {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            score,
            category: recipe.category.clone(),
            area: recipe.area.clone(),
            image: recipe.image.clone(),
            snippet: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_without_title_is_rejected() {
        let rec = RecipeRecord { id: Some("1".into()), ..Default::default() };
        assert_eq!(Recipe::try_from(rec), Err(Malformed::MissingTitle));
    }

    #[test]
    fn blank_id_counts_as_missing() {
        let rec = RecipeRecord { id: Some("  ".into()), title: Some("Soup".into()), ..Default::default() };
        assert_eq!(Recipe::try_from(rec), Err(Malformed::MissingId));
    }

    #[test]
    fn record_parses_with_absent_optionals() {
        let rec: RecipeRecord = serde_json::from_str(r#"{"id":"7","title":"Toast"}"#).unwrap();
        let recipe = Recipe::try_from(rec).unwrap();
        assert!(recipe.category.is_none());
        assert!(recipe.ingredients.is_empty());
    }
}
