use crate::config::EngineConfig;
use crate::recipe::Recipe;
use crate::tokenizer::{query_terms, words};

pub const ELLIPSIS: &str = "...";

fn emphasize(word: &str) -> String { format!("<em>{word}</em>") }

/// Preview text for a hit: a window of the instructions around the first query word.
///
/// A window that stops short of the last word ends in `...`. No match falls back to the
/// opening words, always followed by `...`; empty instructions fall back to the title.
pub fn extract(recipe: &Recipe, query: &str, config: &EngineConfig) -> String {
    let text = recipe.instructions.as_deref().unwrap_or("");
    let doc_words = words(text);
    if doc_words.is_empty() {
        return recipe.title.clone();
    }
    let terms = query_terms(query);
    let hit = doc_words.iter().position(|w| terms.contains(&w.to_lowercase()));
    let (mut out, truncated): (Vec<String>, bool) = match hit {
        Some(i) => {
            let start = i.saturating_sub(config.snippet_window);
            let end = (i + config.snippet_window + 1).min(doc_words.len());
            let window = doc_words[start..end]
                .iter()
                .enumerate()
                .map(|(j, w)| if start + j == i { emphasize(w) } else { w.to_string() })
                .collect();
            (window, end < doc_words.len())
        }
        None => {
            let lead = doc_words
                .iter()
                .take(config.snippet_fallback_words)
                .map(|w| w.to_string())
                .collect();
            (lead, true)
        }
    };
    if truncated {
        out.push(ELLIPSIS.to_string());
    }
    out.join(" ")
}
