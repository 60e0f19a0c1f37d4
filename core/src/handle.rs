use crate::catalog::RecipeCatalog;
use crate::config::EngineConfig;
use crate::engine::{Engine, SearchRequest};
use crate::error::{Error, Result};
use crate::index::IndexArtifact;
use crate::recipe::RankedResult;
use parking_lot::RwLock;
use std::sync::Arc;

/// An artifact together with the recipes it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub artifact: IndexArtifact,
    pub catalog: RecipeCatalog,
}

impl Snapshot {
    pub fn new(artifact: IndexArtifact, catalog: RecipeCatalog) -> Self { Self { artifact, catalog } }

    pub fn engine<'a>(&'a self, config: &'a EngineConfig) -> Engine<'a, RecipeCatalog> {
        Engine::new(&self.artifact, &self.catalog, config)
    }

    pub fn search(&self, config: &EngineConfig, query: &str, top_k: usize) -> Result<Vec<RankedResult>> {
        self.engine(config).search(query, top_k)
    }

    pub fn search_by_ingredients(&self, config: &EngineConfig, ingredients: &[String], top_k: usize) -> Result<Vec<RankedResult>> {
        self.engine(config).search_by_ingredients(ingredients, top_k)
    }

    pub fn search_filtered(&self, config: &EngineConfig, request: &SearchRequest) -> Result<Vec<RankedResult>> {
        self.engine(config).search_filtered(request)
    }
}

/// Publication point for the current snapshot.
///
/// Readers clone the `Arc` and drop the lock immediately, so a publish never waits on a
/// running query and a retired snapshot lives until its last reader finishes.
#[derive(Debug, Default, Clone)]
pub struct IndexHandle {
    current: Arc<RwLock<Option<Arc<Snapshot>>>>,
}

impl IndexHandle {
    pub fn new() -> Self { Self::default() }

    /// Swap in a fully built snapshot, returning the one it replaces.
    pub fn publish(&self, snapshot: Snapshot) -> Option<Arc<Snapshot>> {
        let next = Arc::new(snapshot);
        tracing::info!(num_docs = next.artifact.num_docs(), "publishing index snapshot");
        self.current.write().replace(next)
    }

    pub fn current(&self) -> Result<Arc<Snapshot>> {
        self.current
            .read()
            .clone()
            .ok_or_else(|| Error::ArtifactUnavailable("no index has been built or loaded yet".into()))
    }

    pub fn is_ready(&self) -> bool { self.current.read().is_some() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_index;
    use crate::recipe::{Recipe, RecipeRecord};

    fn snapshot(title: &str) -> Snapshot {
        build_index(vec![RecipeRecord::from(Recipe::new("1", title))]).unwrap().into_snapshot()
    }

    #[test]
    fn unpublished_handle_reports_unavailable() {
        let h = IndexHandle::new();
        assert!(!h.is_ready());
        assert!(matches!(h.current(), Err(Error::ArtifactUnavailable(_))));
    }

    #[test]
    fn held_snapshot_survives_swap() {
        let h = IndexHandle::new();
        h.publish(snapshot("Apple Pie"));
        let held = h.current().unwrap();
        let old = h.publish(snapshot("Beef Stew")).unwrap();
        assert!(Arc::ptr_eq(&held, &old));

        let config = EngineConfig::default();
        assert_eq!(held.search(&config, "apple", 5).unwrap().len(), 1);
        let fresh = h.current().unwrap();
        assert!(fresh.search(&config, "apple", 5).unwrap().is_empty());
        assert_eq!(fresh.search(&config, "stew", 5).unwrap().len(), 1);
    }

    #[test]
    fn readers_on_other_threads_see_whole_snapshots() {
        let h = IndexHandle::new();
        h.publish(snapshot("Apple Pie"));
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let h = h.clone();
                std::thread::spawn(move || {
                    let config = EngineConfig::default();
                    for _ in 0..50 {
                        let snap = h.current().unwrap();
                        assert_eq!(snap.artifact.num_docs(), 1);
                        let _ = snap.search(&config, "pie stew", 3).unwrap();
                    }
                })
            })
            .collect();
        for _ in 0..10 {
            h.publish(snapshot("Beef Stew"));
        }
        for r in readers {
            r.join().unwrap();
        }
    }
}
