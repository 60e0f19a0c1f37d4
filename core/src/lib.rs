//! Recipe retrieval engine: field-weighted TF-IDF indexing, cosine ranking,
//! ingredient-overlap ranking and snippet extraction over an immutable artifact.

pub mod builder;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod engine;
pub mod error;
pub mod handle;
pub mod index;
pub mod ingredients;
pub mod persist;
pub mod query;
pub mod rank;
pub mod recipe;
pub mod snippet;
pub mod tokenizer;
pub mod vocabulary;

pub use builder::{build_index, BuildOutput, IndexBuilder, MalformedPolicy, Rejected};
pub use catalog::{CatalogFilter, DocumentLookup, RecipeCatalog};
pub use config::EngineConfig;
pub use engine::{search, search_by_ingredients, Engine, SearchRequest};
pub use error::{Error, Malformed, Result};
pub use handle::{IndexHandle, Snapshot};
pub use index::{DocPos, IndexArtifact, Posting, SparseVector};
pub use recipe::{RankedResult, Recipe, RecipeRecord};
pub use vocabulary::{TermId, Vocabulary};
