use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{normalize, Suggest, SuggestError};

/// Hard ceiling on the number of (key, word) postings across both indices.
pub const DEFAULT_STORAGE_LIMIT: usize = 1_000_000;

/// Default number of edits covered by the typo index.
pub const DEFAULT_INDEX_MAX_DIST: usize = 1;

const CYRILLIC: &str = "ёйцукенгшщзхъфывапролджэячсмитьбю -,.";
const LATIN: &str = "abcdefghijklmnopqrstuvwxyz";

/// Symbols used for substitutions and insertions when generating typos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alphabet {
    #[default]
    Cyrillic,
    CyrillicLatin,
    Custom(String),
}

impl Alphabet {
    pub fn symbols(&self) -> Vec<char> {
        let s = match self {
            Alphabet::Cyrillic => CYRILLIC.to_string(),
            Alphabet::CyrillicLatin => format!("{}{}", CYRILLIC, LATIN),
            Alphabet::Custom(s) => s.to_lowercase(),
        };

        let mut seen = HashSet::new();
        s.chars().filter(|c| seen.insert(*c)).collect()
    }
}

#[derive(Debug, Clone)]
pub struct IndexOptions {
    pub max_dist: usize,
    pub alphabet: Alphabet,
    pub storage_limit: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            max_dist: DEFAULT_INDEX_MAX_DIST,
            alphabet: Alphabet::default(),
            storage_limit: DEFAULT_STORAGE_LIMIT,
        }
    }
}

type Postings = HashMap<String, BTreeSet<usize>>;

/// Precomputed suggester. Every substring of every word and every string
/// reachable from a word by exactly `max_dist` edits is indexed up front,
/// so a query is a couple of hash lookups.
#[derive(Debug)]
pub struct IndexSuggester {
    words: Vec<String>,
    exact: HashMap<String, usize>,
    subwords: Postings,
    typos: Postings,
    entries: usize,
}

impl IndexSuggester {
    pub fn new(words: Vec<String>, opts: IndexOptions) -> Result<Self, SuggestError> {
        log::info!(
            "building suggestion index for {} words (max_dist={})",
            words.len(),
            opts.max_dist
        );

        let lower: Vec<Vec<char>> = words.iter().map(|w| normalize(w).chars().collect()).collect();

        let mut exact = HashMap::with_capacity(words.len());
        for (i, w) in lower.iter().enumerate() {
            exact.entry(w.iter().collect::<String>()).or_insert(i);
        }

        let mut b = Builder {
            limit: opts.storage_limit,
            entries: 0,
            subwords: Postings::new(),
            typos: Postings::new(),
        };

        for (i, w) in lower.iter().enumerate() {
            b.add_subwords(w, i)?;
        }

        let symbols = opts.alphabet.symbols();
        for (i, w) in lower.iter().enumerate() {
            b.add_typos(w, i, opts.max_dist, &symbols)?;
        }

        log::info!(
            "finished building suggestion index. collected {} entries",
            b.entries
        );

        Ok(Self {
            words,
            exact,
            subwords: b.subwords,
            typos: b.typos,
            entries: b.entries,
        })
    }

    /// Total postings held across the substring and typo indices.
    pub fn entries(&self) -> usize {
        self.entries
    }
}

impl Suggest for IndexSuggester {
    /// An exact word match is returned alone. Otherwise words containing the
    /// query come first, then typo matches, which are dropped entirely when
    /// they would not fit in `max_size`. More than `max_size` substring
    /// matches, or an empty query, is `TooManySuggestions`.
    fn suggest(&self, query: &str, max_size: usize) -> Result<Vec<String>, SuggestError> {
        let query = normalize(query);
        if query.is_empty() {
            return Err(SuggestError::TooManySuggestions);
        }

        if let Some(&i) = self.exact.get(&query) {
            let mut out = vec![self.words[i].clone()];
            out.truncate(max_size);
            return Ok(out);
        }

        let empty = BTreeSet::new();
        let subwords = self.subwords.get(&query).unwrap_or(&empty);
        if subwords.len() > max_size {
            return Err(SuggestError::TooManySuggestions);
        }

        let typos: Vec<usize> = self
            .typos
            .get(&query)
            .map(|t| t.iter().filter(|&&i| !subwords.contains(&i)).copied().collect())
            .unwrap_or_default();

        let mut out: Vec<usize> = subwords.iter().copied().collect();
        if out.len() + typos.len() <= max_size {
            out.extend(typos);
        }

        Ok(out.into_iter().map(|i| self.words[i].clone()).collect())
    }
}

/// Accumulates postings while enforcing the storage ceiling.
struct Builder {
    limit: usize,
    entries: usize,
    subwords: Postings,
    typos: Postings,
}

impl Builder {
    fn add_subwords(&mut self, word: &[char], index: usize) -> Result<(), SuggestError> {
        for i in 0..word.len() {
            for j in i + 1..=word.len() {
                let key: String = word[i..j].iter().collect();
                if self.subwords.entry(key).or_default().insert(index) {
                    self.bump()?;
                }
            }
        }
        Ok(())
    }

    /// Register every string reachable from `word` by exactly `max_dist` edits.
    /// The walk is depth-first over an explicit stack and every leaf is
    /// registered when popped, so the storage ceiling trips before whole
    /// levels of the closure are enumerated.
    fn add_typos(
        &mut self,
        word: &[char],
        index: usize,
        max_dist: usize,
        symbols: &[char],
    ) -> Result<(), SuggestError> {
        let mut stack = vec![(word.to_vec(), max_dist)];
        while let Some((w, depth)) = stack.pop() {
            if depth == 0 {
                self.add_typo(&w, index)?;
                continue;
            }
            for_each_edit(&w, symbols, |m| {
                stack.push((m, depth - 1));
                Ok(())
            })?;
        }
        Ok(())
    }

    fn add_typo(&mut self, mutated: &[char], index: usize) -> Result<(), SuggestError> {
        let key: String = mutated.iter().collect();

        // Plain substrings of the same word are served by the substring index.
        if self.subwords.get(&key).is_some_and(|s| s.contains(&index)) {
            return Ok(());
        }

        if self.typos.entry(key).or_default().insert(index) {
            self.bump()?;
        }
        Ok(())
    }

    fn bump(&mut self) -> Result<(), SuggestError> {
        self.entries += 1;
        if self.entries > self.limit {
            log::error!(
                "suggestion index exceeded the storage limit of {} entries",
                self.limit
            );
            return Err(SuggestError::StorageLimitExceeded { limit: self.limit });
        }
        Ok(())
    }
}

/// Call `f` with every single-edit neighbour of `word`: each deletion, each
/// substitution by an alphabet symbol and each insertion of an alphabet symbol
/// at every position including the end.
fn for_each_edit<F>(word: &[char], symbols: &[char], mut f: F) -> Result<(), SuggestError>
where
    F: FnMut(Vec<char>) -> Result<(), SuggestError>,
{
    for i in 0..word.len() {
        let mut w = word.to_vec();
        w.remove(i);
        f(w)?;
    }

    for i in 0..word.len() {
        for &c in symbols {
            let mut w = word.to_vec();
            w[i] = c;
            f(w)?;
        }
    }

    for i in 0..=word.len() {
        for &c in symbols {
            let mut w = word.to_vec();
            w.insert(i, c);
            f(w)?;
        }
    }
    Ok(())
}
