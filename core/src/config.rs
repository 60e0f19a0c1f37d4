use serde::{Deserialize, Serialize};

/// Tunables shared by index builds and queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Vocabulary cap, by corpus document frequency.
    pub max_features: usize,
    /// Words kept on each side of the first snippet match.
    pub snippet_window: usize,
    /// Words shown when nothing in the instructions matches.
    pub snippet_fallback_words: usize,
    pub default_top_k: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            snippet_window: 10,
            snippet_fallback_words: 25,
            default_top_k: 10,
        }
    }
}
