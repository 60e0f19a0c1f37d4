use crate::index::{IndexArtifact, SparseVector};
use crate::tokenizer::tokenize;

/// Project a query into the artifact's vector space. Unknown terms contribute nothing.
pub fn vectorize_query(artifact: &IndexArtifact, query: &str) -> SparseVector {
    SparseVector::tfidf(&tokenize(query), artifact.vocabulary(), artifact.idf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_index;
    use crate::recipe::{Recipe, RecipeRecord};

    fn artifact() -> IndexArtifact {
        build_index(vec![
            RecipeRecord::from(Recipe::new("1", "Chicken Curry")),
            RecipeRecord::from(Recipe::new("2", "Beef Stew")),
        ])
        .unwrap()
        .artifact
    }

    #[test]
    fn known_terms_give_unit_vector() {
        let q = vectorize_query(&artifact(), "chicken stew");
        assert_eq!(q.len(), 2);
        assert!((q.norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn unknown_and_stop_words_give_zero_vector() {
        assert!(vectorize_query(&artifact(), "pork").is_zero());
        assert!(vectorize_query(&artifact(), "the and of").is_zero());
        assert!(vectorize_query(&artifact(), "   ").is_zero());
    }

    #[test]
    fn vocabulary_does_not_grow() {
        let a = artifact();
        let before = a.vocabulary().len();
        let _ = vectorize_query(&a, "tofu tempeh");
        assert_eq!(a.vocabulary().len(), before);
    }
}
