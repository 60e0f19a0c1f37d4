use std::time::Duration;
use thiserror::Error;

/// Why a record could not be admitted into an index build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    MissingId,
    MissingTitle,
    DuplicateId(String),
}

impl std::fmt::Display for Malformed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Malformed::MissingId => write!(f, "missing id"),
            Malformed::MissingTitle => write!(f, "missing title"),
            Malformed::DuplicateId(id) => write!(f, "duplicate id {id:?}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("corpus is empty")]
    EmptyCorpus,

    #[error("malformed document at position {position}: {reason}")]
    MalformedDocument { position: usize, reason: Malformed },

    #[error("index artifact unavailable: {0}")]
    ArtifactUnavailable(String),

    #[error("document {0:?} not found in lookup")]
    DocumentNotFound(String),

    #[error("query scan timed out after {elapsed:?}")]
    Timeout { elapsed: Duration },

    #[error("corrupt index artifact: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
