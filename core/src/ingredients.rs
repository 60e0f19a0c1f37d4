use crate::catalog::DocumentLookup;
use crate::error::{Error, Result};
use crate::index::{DocPos, IndexArtifact};
use crate::rank::{top_k, Scored};
use crate::recipe::Recipe;

fn normalize(ingredients: &[String]) -> Vec<String> {
    ingredients
        .iter()
        .filter(|i| !i.trim().is_empty())
        .map(|i| i.to_lowercase())
        .collect()
}

/// Fraction of `wanted` (already lowercased) found as substrings of the recipe's ingredient text.
fn match_fraction(recipe: &Recipe, wanted: &[String]) -> f32 {
    let haystack = recipe.joined_ingredients(", ").to_lowercase();
    let hits = wanted.iter().filter(|w| haystack.contains(w.as_str())).count();
    hits as f32 / wanted.len() as f32
}

/// Score every document by the share of requested ingredients it contains.
///
/// Matching is raw substring containment, so "egg" also hits "eggplant".
/// Documents with no match are left out; ties keep corpus order.
pub fn rank_by_ingredients<L>(artifact: &IndexArtifact, lookup: &L, ingredients: &[String], k: usize) -> Result<Vec<Scored>>
where
    L: DocumentLookup + ?Sized,
{
    let wanted = normalize(ingredients);
    if wanted.is_empty() || k == 0 {
        return Ok(Vec::new());
    }
    let mut candidates = Vec::new();
    for (pos, id) in artifact.doc_ids().enumerate() {
        let recipe = lookup.document(id).ok_or_else(|| Error::DocumentNotFound(id.to_string()))?;
        let score = match_fraction(recipe, &wanted);
        if score > 0.0 {
            candidates.push(Scored { pos: pos as DocPos, score });
        }
    }
    Ok(top_k(candidates, k))
}

/// Inclusion gate for filtered text search: any requested ingredient appears in the recipe.
pub fn matches_any_ingredient(recipe: &Recipe, ingredients: &[String]) -> bool {
    let haystack = recipe.joined_ingredients(" ").to_lowercase();
    normalize(ingredients).iter().any(|w| haystack.contains(w.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_index;
    use crate::recipe::RecipeRecord;

    fn strings(v: &[&str]) -> Vec<String> { v.iter().map(|s| s.to_string()).collect() }

    #[test]
    fn case_insensitive_full_match_scores_one() {
        let r = Recipe::new("1", "Grilled").with_ingredients(["Chicken breast", "Salt"]);
        assert_eq!(match_fraction(&r, &normalize(&strings(&["chicken"]))), 1.0);
    }

    #[test]
    fn partial_match_is_fractional_and_misses_are_dropped() {
        let out = build_index(vec![
            RecipeRecord::from(Recipe::new("a", "Omelette").with_ingredients(["Eggs", "Milk"])),
            RecipeRecord::from(Recipe::new("b", "Salad").with_ingredients(["Lettuce"])),
            RecipeRecord::from(Recipe::new("c", "Moussaka").with_ingredients(["Eggplant", "Lamb", "Milk"])),
        ])
        .unwrap();
        let hits = rank_by_ingredients(&out.artifact, &out.catalog, &strings(&["egg", "lamb"]), 10).unwrap();
        let got: Vec<(DocPos, f32)> = hits.iter().map(|s| (s.pos, s.score)).collect();
        // substring containment: "egg" matches "eggplant"
        assert_eq!(got, vec![(2, 1.0), (0, 0.5)]);
    }

    #[test]
    fn blank_request_yields_nothing() {
        let out = build_index(vec![RecipeRecord::from(Recipe::new("a", "Toast").with_ingredients(["Bread"]))]).unwrap();
        assert!(rank_by_ingredients(&out.artifact, &out.catalog, &strings(&["  "]), 5).unwrap().is_empty());
    }

    #[test]
    fn missing_document_is_an_error() {
        let out = build_index(vec![RecipeRecord::from(Recipe::new("a", "Toast"))]).unwrap();
        let empty: std::collections::HashMap<String, Recipe> = Default::default();
        let err = rank_by_ingredients(&out.artifact, &empty, &strings(&["bread"]), 5).unwrap_err();
        assert!(matches!(err, Error::DocumentNotFound(id) if id == "a"));
    }

    #[test]
    fn gate_checks_any_ingredient() {
        let r = Recipe::new("1", "Stew").with_ingredients(["Beef", "Carrot"]);
        assert!(matches_any_ingredient(&r, &strings(&["pork", "CARROT"])));
        assert!(!matches_any_ingredient(&r, &strings(&["pork"])));
    }

    #[test]
    fn surrounding_spaces_are_part_of_the_term() {
        let first = Recipe::new("1", "Omelette").with_ingredients(["Eggs", "Milk"]);
        let second = Recipe::new("2", "Custard").with_ingredients(["Milk", "Eggs"]);
        let wanted = strings(&[" egg"]);
        assert!(!matches_any_ingredient(&first, &wanted));
        assert!(matches_any_ingredient(&second, &wanted));
        assert_eq!(match_fraction(&second, &normalize(&strings(&[" egg", "  ", "sugar"]))), 0.5);
    }
}
