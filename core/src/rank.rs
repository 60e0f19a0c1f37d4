use crate::error::{Error, Result};
use crate::index::{DocPos, IndexArtifact, SparseVector};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Instant;

/// A scored document. Orders so that "greater" means ranked earlier:
/// higher score first, then earlier corpus position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
    pub pos: DocPos,
    pub score: f32,
}

impl Eq for Scored {}

impl Ord for Scored {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for Scored {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

/// Best `k` of `candidates`, best first, via a bounded min-heap.
pub fn top_k<I>(candidates: I, k: usize) -> Vec<Scored>
where
    I: IntoIterator<Item = Scored>,
{
    if k == 0 {
        return Vec::new();
    }
    let mut heap: BinaryHeap<Reverse<Scored>> = BinaryHeap::with_capacity(k + 1);
    for c in candidates {
        if heap.len() < k {
            heap.push(Reverse(c));
        } else if let Some(Reverse(worst)) = heap.peek() {
            if c > *worst {
                heap.pop();
                heap.push(Reverse(c));
            }
        }
    }
    let mut out: Vec<Scored> = heap.into_iter().map(|Reverse(s)| s).collect();
    out.sort_by(|a, b| b.cmp(a));
    out
}

/// Cosine similarity of the query against every document; zero scores are dropped.
pub fn rank(artifact: &IndexArtifact, query: &SparseVector, k: usize) -> Vec<Scored> {
    // only a deadline can fail the scan
    scan(artifact, query, k, None).unwrap_or_default()
}

/// Like [`rank`], but gives up with [`Error::Timeout`] once `deadline` passes.
/// The deadline is checked between posting lists, so overrun is bounded by one list.
pub fn rank_with_deadline(artifact: &IndexArtifact, query: &SparseVector, k: usize, deadline: Instant) -> Result<Vec<Scored>> {
    scan(artifact, query, k, Some(deadline))
}

fn scan(artifact: &IndexArtifact, query: &SparseVector, k: usize, deadline: Option<Instant>) -> Result<Vec<Scored>> {
    if k == 0 || query.is_zero() || artifact.is_empty() {
        return Ok(Vec::new());
    }
    let started = Instant::now();
    // dense accumulator: equivalent to one dot product per document
    let mut scores = vec![0.0f32; artifact.num_docs()];
    for (tid, q_w) in query.iter() {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                return Err(Error::Timeout { elapsed: started.elapsed() });
            }
        }
        for p in artifact.postings(tid) {
            scores[p.pos as usize] += p.weight * q_w;
        }
    }
    let candidates = scores
        .into_iter()
        .enumerate()
        .filter(|(_, s)| *s > 0.0)
        .map(|(pos, s)| Scored { pos: pos as DocPos, score: s.min(1.0) });
    let hits = top_k(candidates, k);
    tracing::debug!(hits = hits.len(), elapsed_us = started.elapsed().as_micros() as u64, "ranked query");
    Ok(hits)
}
