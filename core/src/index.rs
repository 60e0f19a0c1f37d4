use crate::tokenizer::tokenize;
use crate::vocabulary::{TermId, Vocabulary};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Position of a document inside one artifact, in corpus order.
pub type DocPos = u32;

/// Sparse term-weight vector, entries sorted by term id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(TermId, f32)>,
}

impl SparseVector {
    /// Raw tf over vocabulary terms, times idf, L2-normalized. Out-of-vocabulary tokens are dropped.
    pub fn tfidf<S: AsRef<str>>(tokens: &[S], vocabulary: &Vocabulary, idf: &[f32]) -> Self {
        let mut tf: BTreeMap<TermId, u32> = BTreeMap::new();
        for tok in tokens {
            if let Some(tid) = vocabulary.get(tok.as_ref()) {
                *tf.entry(tid).or_insert(0) += 1;
            }
        }
        let mut entries: Vec<(TermId, f32)> = tf
            .into_iter()
            .map(|(tid, n)| (tid, n as f32 * idf[tid as usize]))
            .collect();
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in entries.iter_mut() { *w /= norm; }
        }
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, f32)> + '_ { self.entries.iter().copied() }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_zero(&self) -> bool { self.entries.is_empty() }

    pub fn norm(&self) -> f32 { self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt() }

    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j, mut acc) = (0, 0, 0.0f32);
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            if a == b {
                acc += wa * wb;
                i += 1;
                j += 1;
            } else if a < b {
                i += 1;
            } else {
                j += 1;
            }
        }
        acc
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub pos: DocPos,
    pub weight: f32, // normalized tf-idf weight
}

/// Immutable output of one index build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexArtifact {
    vocabulary: Vocabulary,
    idf: Vec<f32>,
    vectors: Vec<SparseVector>,
    doc_ids: Vec<String>,
    positions: HashMap<String, DocPos>,
    postings: Vec<Vec<Posting>>, // per term id, sorted by pos
}

impl IndexArtifact {
    /// Second build pass over `(id, composed text)` pairs in corpus order.
    pub(crate) fn vectorize(vocabulary: Vocabulary, idf: Vec<f32>, docs: Vec<(String, String)>) -> Self {
        let mut vectors = Vec::with_capacity(docs.len());
        let mut doc_ids = Vec::with_capacity(docs.len());
        let mut positions = HashMap::with_capacity(docs.len());
        let mut postings: Vec<Vec<Posting>> = vec![Vec::new(); vocabulary.len()];
        for (pos, (id, text)) in docs.into_iter().enumerate() {
            let pos = pos as DocPos;
            let vector = SparseVector::tfidf(&tokenize(&text), &vocabulary, &idf);
            for (tid, weight) in vector.iter() {
                postings[tid as usize].push(Posting { pos, weight });
            }
            vectors.push(vector);
            positions.insert(id.clone(), pos);
            doc_ids.push(id);
        }
        Self { vocabulary, idf, vectors, doc_ids, positions, postings }
    }

    pub fn num_docs(&self) -> usize { self.vectors.len() }

    pub fn is_empty(&self) -> bool { self.vectors.is_empty() }

    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

    pub fn idf(&self) -> &[f32] { &self.idf }

    pub fn vector(&self, pos: DocPos) -> Option<&SparseVector> { self.vectors.get(pos as usize) }

    pub fn doc_id(&self, pos: DocPos) -> Option<&str> { self.doc_ids.get(pos as usize).map(String::as_str) }

    pub fn position(&self, id: &str) -> Option<DocPos> { self.positions.get(id).copied() }

    /// Document ids in corpus order.
    pub fn doc_ids(&self) -> impl Iterator<Item = &str> + '_ { self.doc_ids.iter().map(String::as_str) }

    pub fn postings(&self, term: TermId) -> &[Posting] {
        self.postings.get(term as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Structural consistency check, used after loading a persisted artifact.
    pub fn validate(&self) -> Result<(), String> {
        self.vocabulary.validate()?;
        if self.idf.len() != self.vocabulary.len() || self.postings.len() != self.vocabulary.len() {
            return Err(format!(
                "vocabulary has {} terms but idf has {} and postings {}",
                self.vocabulary.len(), self.idf.len(), self.postings.len()
            ));
        }
        if self.doc_ids.len() != self.vectors.len() || self.positions.len() != self.vectors.len() {
            return Err("document id mapping does not match vector count".into());
        }
        for (pos, id) in self.doc_ids.iter().enumerate() {
            if self.positions.get(id) != Some(&(pos as DocPos)) {
                return Err(format!("id {id:?} maps to the wrong position"));
            }
        }
        let num_terms = self.vocabulary.len();
        for (pos, vector) in self.vectors.iter().enumerate() {
            if let Some((tid, _)) = vector.iter().find(|&(tid, _)| tid as usize >= num_terms) {
                return Err(format!("document {pos} refers to term {tid} outside the vocabulary"));
            }
        }
        let num_docs = self.vectors.len();
        for (tid, list) in self.postings.iter().enumerate() {
            if let Some(p) = list.iter().find(|p| p.pos as usize >= num_docs) {
                return Err(format!("postings for term {tid} point at document {} of {num_docs}", p.pos));
            }
        }
        Ok(())
    }
}
