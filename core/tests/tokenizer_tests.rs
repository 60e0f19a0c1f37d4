use recipe_core::tokenizer::{query_terms, tokenize, words};

#[test]
fn it_lowercases_and_splits_on_punctuation() {
    let toks = tokenize("Pan-fried GARLIC, butter & herbs!");
    assert_eq!(toks, vec!["pan", "fried", "garlic", "butter", "herbs"]);
}

#[test]
fn it_filters_stopwords() {
    let toks = tokenize("Put the rice into the pot and cover it");
    assert!(!toks.contains(&"the".to_string()));
    assert!(!toks.contains(&"and".to_string()));
    assert!(!toks.contains(&"put".to_string()));
    assert!(toks.contains(&"rice".to_string()));
    assert!(toks.contains(&"pot".to_string()));
}

#[test]
fn snippet_words_keep_everything() {
    assert_eq!(words("Put the rice in."), vec!["Put", "the", "rice", "in"]);
    let terms = query_terms("Rice, BEANS");
    assert!(terms.contains("rice"));
    assert!(terms.contains("beans"));
}
