use crate::catalog::RecipeCatalog;
use crate::compose::compose;
use crate::config::EngineConfig;
use crate::error::{Error, Malformed, Result};
use crate::handle::Snapshot;
use crate::index::IndexArtifact;
use crate::recipe::{Recipe, RecipeRecord};
use crate::tokenizer::tokenize;
use crate::vocabulary::VocabularyBuilder;
use std::collections::HashSet;

/// What to do with a record that lacks an id or title, or repeats an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Leave it out and report it in [`BuildOutput::rejected`].
    #[default]
    Skip,
    /// Fail the whole build on the first one.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub position: usize,
    pub reason: Malformed,
}

#[derive(Debug)]
pub struct BuildOutput {
    pub artifact: IndexArtifact,
    pub catalog: RecipeCatalog,
    pub rejected: Vec<Rejected>,
}

impl BuildOutput {
    pub fn into_snapshot(self) -> Snapshot { Snapshot::new(self.artifact, self.catalog) }
}

pub struct IndexBuilder {
    config: EngineConfig,
    policy: MalformedPolicy,
    require_documents: bool,
}

impl IndexBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self { config, policy: MalformedPolicy::default(), require_documents: false }
    }

    pub fn policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Turn an empty corpus into [`Error::EmptyCorpus`] instead of an empty artifact.
    pub fn require_documents(mut self, yes: bool) -> Self {
        self.require_documents = yes;
        self
    }

    pub fn build<I>(&self, records: I) -> Result<BuildOutput>
    where
        I: IntoIterator<Item = RecipeRecord>,
    {
        let mut recipes: Vec<Recipe> = Vec::new();
        let mut rejected: Vec<Rejected> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (position, record) in records.into_iter().enumerate() {
            let checked = Recipe::try_from(record).and_then(|r| {
                if seen.contains(&r.id) { Err(Malformed::DuplicateId(r.id)) } else { Ok(r) }
            });
            match checked {
                Ok(recipe) => {
                    seen.insert(recipe.id.clone());
                    recipes.push(recipe);
                }
                Err(reason) => {
                    if self.policy == MalformedPolicy::Abort {
                        return Err(Error::MalformedDocument { position, reason });
                    }
                    tracing::warn!(position, %reason, "skipping malformed recipe");
                    rejected.push(Rejected { position, reason });
                }
            }
        }

        if recipes.is_empty() {
            if self.require_documents {
                return Err(Error::EmptyCorpus);
            }
            tracing::warn!("building index over an empty corpus; every query will return nothing");
        }

        let composed: Vec<(String, String)> = recipes.iter().map(|r| (r.id.clone(), compose(r))).collect();

        let mut vocab_builder = VocabularyBuilder::new();
        for (_, text) in &composed {
            vocab_builder.observe(&tokenize(text));
        }
        let (vocabulary, idf) = vocab_builder.finish(self.config.max_features);
        let artifact = IndexArtifact::vectorize(vocabulary, idf, composed);

        tracing::info!(
            num_docs = artifact.num_docs(),
            num_terms = artifact.vocabulary().len(),
            rejected = rejected.len(),
            "index build complete"
        );
        Ok(BuildOutput { artifact, catalog: RecipeCatalog::from_recipes(recipes), rejected })
    }
}

/// Build with default settings, skipping malformed records.
pub fn build_index<I>(records: I) -> Result<BuildOutput>
where
    I: IntoIterator<Item = RecipeRecord>,
{
    IndexBuilder::new(EngineConfig::default()).build(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: Option<&str>, title: Option<&str>) -> RecipeRecord {
        RecipeRecord { id: id.map(Into::into), title: title.map(Into::into), ..Default::default() }
    }

    #[test]
    fn skip_policy_reports_rejects() {
        let out = build_index(vec![
            rec(Some("1"), Some("Chicken Curry")),
            rec(None, Some("Nameless")),
            rec(Some("1"), Some("Copy")),
            rec(Some("2"), None),
        ])
        .unwrap();
        assert_eq!(out.artifact.num_docs(), 1);
        assert_eq!(
            out.rejected,
            vec![
                Rejected { position: 1, reason: Malformed::MissingId },
                Rejected { position: 2, reason: Malformed::DuplicateId("1".into()) },
                Rejected { position: 3, reason: Malformed::MissingTitle },
            ]
        );
    }

    #[test]
    fn abort_policy_fails_on_first_malformed() {
        let err = IndexBuilder::new(EngineConfig::default())
            .policy(MalformedPolicy::Abort)
            .build(vec![rec(Some("1"), Some("Soup")), rec(Some("2"), None)])
            .unwrap_err();
        assert!(matches!(err, Error::MalformedDocument { position: 1, reason: Malformed::MissingTitle }));
    }

    #[test]
    fn empty_corpus_is_valid_unless_required() {
        let out = build_index(Vec::new()).unwrap();
        assert!(out.artifact.is_empty());
        assert!(out.artifact.vocabulary().is_empty());
        let err = IndexBuilder::new(EngineConfig::default())
            .require_documents(true)
            .build(Vec::new())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyCorpus));
    }

    #[test]
    fn max_features_caps_vocabulary() {
        let config = EngineConfig { max_features: 3, ..EngineConfig::default() };
        let out = IndexBuilder::new(config)
            .build(vec![RecipeRecord::from(
                Recipe::new("1", "Lemon Tart").with_instructions("Whisk eggs sugar butter zest"),
            )])
            .unwrap();
        assert_eq!(out.artifact.vocabulary().len(), 3);
    }
}
