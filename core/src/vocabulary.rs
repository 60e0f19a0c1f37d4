use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type TermId = u32;

/// Frozen term -> id mapping. Ids are dense in `[0, len)` and only meaningful within one build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: Vec<String>,
    ids: HashMap<String, TermId>,
}

impl Vocabulary {
    fn from_terms(terms: Vec<String>) -> Self {
        let ids = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as TermId))
            .collect();
        Self { terms, ids }
    }

    pub fn get(&self, term: &str) -> Option<TermId> { self.ids.get(term).copied() }

    pub fn term(&self, id: TermId) -> Option<&str> { self.terms.get(id as usize).map(String::as_str) }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    /// Every term must map back to its own dense id.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.ids.len() != self.terms.len() {
            return Err(format!("vocabulary has {} terms but {} ids", self.terms.len(), self.ids.len()));
        }
        for (i, term) in self.terms.iter().enumerate() {
            if self.ids.get(term) != Some(&(i as TermId)) {
                return Err(format!("term {term:?} maps to the wrong id"));
            }
        }
        Ok(())
    }
}

/// Smoothed inverse document frequency, always >= 1.
pub fn smoothed_idf(num_docs: usize, df: u32) -> f32 {
    (((1 + num_docs) as f32) / ((1 + df) as f32)).ln() + 1.0
}

/// First pass of an index build: document frequencies in first-encounter order.
#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    order: Vec<String>,
    df: HashMap<String, u32>,
    num_docs: usize,
}

impl VocabularyBuilder {
    pub fn new() -> Self { Self::default() }

    /// Record one document's tokens. Each distinct term counts once toward df.
    pub fn observe<S: AsRef<str>>(&mut self, tokens: &[S]) {
        self.num_docs += 1;
        let mut seen: HashSet<&str> = HashSet::new();
        for tok in tokens {
            let tok = tok.as_ref();
            if !seen.insert(tok) { continue; }
            match self.df.get_mut(tok) {
                Some(n) => *n += 1,
                None => {
                    self.df.insert(tok.to_string(), 1);
                    self.order.push(tok.to_string());
                }
            }
        }
    }

    /// Keep the `max_terms` highest-df terms (ties by first encounter) and compute idf.
    pub fn finish(self, max_terms: usize) -> (Vocabulary, Vec<f32>) {
        let mut ranked: Vec<(usize, &String, u32)> = self
            .order
            .iter()
            .enumerate()
            .map(|(i, t)| (i, t, self.df[t]))
            .collect();
        if ranked.len() > max_terms {
            // stable sort keeps first-encounter order among equal df
            ranked.sort_by(|a, b| b.2.cmp(&a.2));
            ranked.truncate(max_terms);
            ranked.sort_by_key(|(i, _, _)| *i);
        }
        let idf = ranked
            .iter()
            .map(|(_, _, df)| smoothed_idf(self.num_docs, *df))
            .collect();
        let terms = ranked.into_iter().map(|(_, t, _)| t.clone()).collect();
        (Vocabulary::from_terms(terms), idf)
    }
}
