mod index;
mod scanner;

pub use index::{
    Alphabet, IndexOptions, IndexSuggester, DEFAULT_INDEX_MAX_DIST, DEFAULT_STORAGE_LIMIT,
};
pub use scanner::{ScannerSuggester, DEFAULT_SCANNER_MAX_DIST};

use serde::{Deserialize, Serialize};

/// Default number of candidates returned by `suggest`.
pub const DEFAULT_MAX_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuggestError {
    /// The query is empty or matches too many entries to rank.
    #[error("too many suggestions")]
    TooManySuggestions,

    /// Building the index would exceed the entry ceiling.
    #[error("suggestion index exceeds the storage limit of {limit} entries")]
    StorageLimitExceeded { limit: usize },
}

/// Ranked lookup of a free-text query against a fixed vocabulary.
pub trait Suggest: Send + Sync {
    /// Return at most `max_size` distinct vocabulary words, best match first.
    fn suggest(&self, query: &str, max_size: usize) -> Result<Vec<String>, SuggestError>;
}

/// Matching strategy for a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Linear edit-distance scan on every query. Cheap to build.
    #[default]
    Scanner,
    /// Precomputed substring and typo index. Expensive to build, fast to query.
    Index,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Scanner => write!(f, "scanner"),
            Strategy::Index => write!(f, "index"),
        }
    }
}

/// One of the two suggestion strategies, built over a fixed vocabulary.
pub enum Suggester {
    Scanner(ScannerSuggester),
    Index(IndexSuggester),
}

impl Suggester {
    pub fn strategy(&self) -> Strategy {
        match self {
            Suggester::Scanner(_) => Strategy::Scanner,
            Suggester::Index(_) => Strategy::Index,
        }
    }

    /// Number of entries held by the precomputed indices (0 for the scanner).
    pub fn entries(&self) -> usize {
        match self {
            Suggester::Scanner(_) => 0,
            Suggester::Index(s) => s.entries(),
        }
    }
}

impl Suggest for Suggester {
    fn suggest(&self, query: &str, max_size: usize) -> Result<Vec<String>, SuggestError> {
        match self {
            Suggester::Scanner(s) => s.suggest(query, max_size),
            Suggester::Index(s) => s.suggest(query, max_size),
        }
    }
}

impl From<ScannerSuggester> for Suggester {
    fn from(s: ScannerSuggester) -> Self {
        Suggester::Scanner(s)
    }
}

impl From<IndexSuggester> for Suggester {
    fn from(s: IndexSuggester) -> Self {
        Suggester::Index(s)
    }
}

/// Normalize a query or vocabulary word: lowercase and trim surrounding whitespace.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
