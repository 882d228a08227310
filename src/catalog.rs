use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    policy::{self, Decision, Outcome, Resolution, Resolved},
    suggester::{
        normalize, Alphabet, IndexOptions, IndexSuggester, ScannerSuggester, Strategy, Suggest,
        SuggestError, Suggester, DEFAULT_INDEX_MAX_DIST, DEFAULT_MAX_SIZE,
        DEFAULT_SCANNER_MAX_DIST, DEFAULT_STORAGE_LIMIT,
    },
};

/// A canonical catalog item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display name.
    pub name: String,
    /// Additional display names (eg. the name in another language). Suggested like `name`.
    #[serde(default)]
    pub alt_names: Vec<String>,
    /// Aliases that are only matched exactly.
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// How a catalog's suggester is built.
#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    pub strategy: Strategy,
    /// Defaults to 5 for the scanner and 1 for the index.
    pub max_dist: Option<usize>,
    pub alphabet: Alphabet,
    pub storage_limit: Option<usize>,
    pub max_results: Option<usize>,
}

/// A named catalog: an exact synonym map in front of a suggester built
/// over the display names.
pub struct Catalog {
    name: String,
    entries: Vec<CatalogEntry>,
    synonyms: HashMap<String, usize>,
    by_word: HashMap<String, usize>,
    suggester: Suggester,
    max_results: usize,
}

impl Catalog {
    pub fn new(
        name: &str,
        entries: Vec<CatalogEntry>,
        opts: &CatalogOptions,
    ) -> Result<Self, SuggestError> {
        // Vocabulary: every name, then every alternative name.
        let mut vocab: Vec<String> = Vec::with_capacity(entries.len());
        let mut by_word = HashMap::new();
        let names = entries.iter().enumerate().map(|(i, e)| (i, &e.name));
        let alts = entries
            .iter()
            .enumerate()
            .flat_map(|(i, e)| e.alt_names.iter().map(move |a| (i, a)));
        for (i, w) in names.chain(alts) {
            let key = normalize(w);
            if key.is_empty() || by_word.contains_key(&key) {
                continue;
            }
            by_word.insert(key, i);
            vocab.push(w.clone());
        }

        let mut synonyms = by_word.clone();
        for (i, e) in entries.iter().enumerate() {
            for s in &e.synonyms {
                let key = normalize(s);
                if !key.is_empty() {
                    synonyms.entry(key).or_insert(i);
                }
            }
        }

        let suggester: Suggester = match opts.strategy {
            Strategy::Scanner => ScannerSuggester::new(
                vocab,
                opts.max_dist.unwrap_or(DEFAULT_SCANNER_MAX_DIST),
            )
            .into(),
            Strategy::Index => IndexSuggester::new(
                vocab,
                IndexOptions {
                    max_dist: opts.max_dist.unwrap_or(DEFAULT_INDEX_MAX_DIST),
                    alphabet: opts.alphabet.clone(),
                    storage_limit: opts.storage_limit.unwrap_or(DEFAULT_STORAGE_LIMIT),
                },
            )?
            .into(),
        };

        log::info!(
            "catalog '{}': {} entries, {} synonyms ({})",
            name,
            entries.len(),
            synonyms.len(),
            suggester.strategy()
        );

        Ok(Self {
            name: name.to_string(),
            entries,
            synonyms,
            by_word,
            suggester,
            max_results: opts.max_results.unwrap_or(DEFAULT_MAX_SIZE),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn strategy(&self) -> Strategy {
        self.suggester.strategy()
    }

    /// Number of postings in the suggester's precomputed index.
    pub fn index_entries(&self) -> usize {
        self.suggester.entries()
    }

    /// Default result budget for this catalog.
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Exact lookup of a name, alternative name or synonym.
    pub fn resolve(&self, query: &str) -> Option<&CatalogEntry> {
        self.synonyms
            .get(&normalize(query))
            .map(|&i| &self.entries[i])
    }

    /// Entry owning a suggested vocabulary word.
    pub fn entry_for(&self, word: &str) -> Option<&CatalogEntry> {
        self.word_index(word).map(|i| &self.entries[i])
    }

    pub fn suggest(&self, query: &str, max_size: usize) -> Result<Vec<String>, SuggestError> {
        self.suggester.suggest(query, max_size)
    }

    /// Synonym map first, then the suggester and the selection policy.
    pub fn lookup(&self, query: &str, max_size: usize) -> Result<Decision, SuggestError> {
        if let Some(e) = self.resolve(query) {
            return Ok(Decision::Accepted {
                word: e.name.clone(),
                corrected_from: None,
                suggestion: None,
            });
        }

        let d = match policy::decide(query, self.suggest(query, max_size))? {
            Decision::Accepted {
                word,
                corrected_from,
                suggestion,
            } => Decision::Accepted {
                word: self
                    .entry_for(&word)
                    .map(|e| e.name.clone())
                    .unwrap_or(word),
                corrected_from,
                suggestion,
            },
            d => d,
        };
        Ok(d)
    }

    /// The entry for `query` if it is a synonym or the suggester has exactly
    /// one candidate for it.
    pub fn get(&self, query: &str) -> Option<&CatalogEntry> {
        if let Some(e) = self.resolve(query) {
            return Some(e);
        }

        match self.suggest(query, self.max_results) {
            Ok(words) if words.len() == 1 => self.entry_for(&words[0]),
            _ => None,
        }
    }

    /// Resolve a `,`/`+` separated list of names, each optionally prefixed with
    /// a coefficient. Fragments that are not exact names take the top suggestion.
    pub fn lookup_many(&self, text: &str) -> Resolution {
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        for frag in policy::split_fragments(text) {
            let (coefficient, fragment) = match frag {
                Ok(f) => f,
                Err((fragment, reason)) => {
                    items.push(Resolved {
                        fragment,
                        coefficient: 0,
                        outcome: Outcome::Invalid { reason },
                    });
                    continue;
                }
            };

            let (outcome, entry) = match self.synonyms.get(&normalize(&fragment)) {
                Some(&i) => (
                    Outcome::Found {
                        word: self.entries[i].name.clone(),
                    },
                    Some(i),
                ),
                None => self.canonical(policy::best_guess(
                    &fragment,
                    self.suggest(&fragment, self.max_results),
                )),
            };

            // Report the same entry reached twice.
            let outcome = match (outcome, entry) {
                (Outcome::Found { word } | Outcome::Corrected { word, .. }, Some(i))
                    if !seen.insert(i) =>
                {
                    Outcome::Duplicate { word }
                }
                (o, _) => o,
            };

            items.push(Resolved {
                fragment,
                coefficient,
                outcome,
            });
        }

        Resolution { items }
    }

    fn word_index(&self, word: &str) -> Option<usize> {
        self.by_word.get(&normalize(word)).copied()
    }

    /// Replace a suggested vocabulary word with its entry's name.
    fn canonical(&self, outcome: Outcome) -> (Outcome, Option<usize>) {
        match outcome {
            Outcome::Found { word } => match self.word_index(&word) {
                Some(i) => (
                    Outcome::Found {
                        word: self.entries[i].name.clone(),
                    },
                    Some(i),
                ),
                None => (Outcome::Found { word }, None),
            },
            Outcome::Corrected { word, suggestion } => match self.word_index(&suggestion) {
                Some(i) => (
                    Outcome::Corrected {
                        word: self.entries[i].name.clone(),
                        suggestion,
                    },
                    Some(i),
                ),
                None => (Outcome::Corrected { word, suggestion }, None),
            },
            o => (o, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, alt: &[&str], syn: &[&str]) -> CatalogEntry {
        CatalogEntry {
            name: name.to_string(),
            alt_names: alt.iter().map(|s| s.to_string()).collect(),
            synonyms: syn.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn herbs(strategy: Strategy) -> Catalog {
        let entries = vec![
            entry("Мята", &["mint"], &["мятный лист"]),
            entry("Шалфей", &["sage"], &[]),
            entry("Крапива", &["nettle"], &["жгучка"]),
            entry("Мандрагора", &["mandrake"], &[]),
        ];
        let opts = CatalogOptions {
            strategy,
            max_dist: Some(1),
            alphabet: Alphabet::CyrillicLatin,
            ..Default::default()
        };
        Catalog::new("herbs", entries, &opts).unwrap()
    }

    #[test]
    fn test_synonym_fast_path() {
        for s in [Strategy::Scanner, Strategy::Index] {
            let c = herbs(s);
            assert_eq!(c.resolve("ЖГУЧКА").unwrap().name, "Крапива");
            assert_eq!(c.resolve(" mint ").unwrap().name, "Мята");
            assert_eq!(c.resolve("мятный лист").unwrap().name, "Мята");
            assert!(c.resolve("мятн").is_none());

            assert_eq!(
                c.lookup("жгучка", 5).unwrap(),
                Decision::Accepted {
                    word: "Крапива".to_string(),
                    corrected_from: None,
                    suggestion: None
                }
            );
        }
    }

    #[test]
    fn test_synonyms_are_not_suggested() {
        let c = herbs(Strategy::Index);
        assert!(c.suggest("жгучк", 5).unwrap().is_empty());
    }

    #[test]
    fn test_lookup_correction() {
        for s in [Strategy::Scanner, Strategy::Index] {
            let c = herbs(s);
            let d = c.lookup("мандрогора", 5).unwrap();
            assert_eq!(
                d,
                Decision::Accepted {
                    word: "Мандрагора".to_string(),
                    corrected_from: Some("мандрогора".to_string()),
                    suggestion: Some("Мандрагора".to_string())
                }
            );
            assert_eq!(c.lookup("zzzzzzzz", 5).unwrap(), Decision::NotFound);
        }
    }

    #[test]
    fn test_correction_to_alt_name_returns_entry_name() {
        for s in [Strategy::Scanner, Strategy::Index] {
            let c = herbs(s);
            let d = c.lookup("netle", 5).unwrap();
            assert_eq!(
                d,
                Decision::Accepted {
                    word: "Крапива".to_string(),
                    corrected_from: Some("netle".to_string()),
                    suggestion: Some("nettle".to_string())
                }
            );
            assert_eq!(d.message(), "interpreting netle as nettle");

            // Same entry as the exact alt name.
            assert_eq!(
                c.lookup("nettle", 5).unwrap(),
                Decision::Accepted {
                    word: "Крапива".to_string(),
                    corrected_from: None,
                    suggestion: None
                }
            );
        }
    }

    #[test]
    fn test_lookup_too_broad() {
        let c = herbs(Strategy::Index);
        assert_eq!(c.lookup("а", 2).unwrap(), Decision::TooBroad);
    }

    #[test]
    fn test_get() {
        let c = herbs(Strategy::Index);
        assert_eq!(c.get("sage").unwrap().name, "Шалфей");
        assert_eq!(c.get("mandrak").unwrap().name, "Мандрагора");
        assert!(c.get("а").is_none());
    }

    #[test]
    fn test_entry_for_alt_name() {
        let c = herbs(Strategy::Scanner);
        assert_eq!(c.entry_for("Nettle").unwrap().name, "Крапива");
        assert_eq!(c.len(), 4);
        assert!(!c.is_empty());
        assert_eq!(c.index_entries(), 0);
        assert!(herbs(Strategy::Index).index_entries() > 0);
    }

    #[test]
    fn test_lookup_many() {
        let c = herbs(Strategy::Index);
        let r = c.lookup_many("2 mint, шалфей + 3*netle, мятный лист, 1 2 x");
        let outcomes: Vec<&Outcome> = r.items.iter().map(|i| &i.outcome).collect();
        assert_eq!(
            outcomes,
            vec![
                &Outcome::Found {
                    word: "Мята".to_string()
                },
                &Outcome::Found {
                    word: "Шалфей".to_string()
                },
                &Outcome::Corrected {
                    word: "Крапива".to_string(),
                    suggestion: "nettle".to_string()
                },
                &Outcome::Duplicate {
                    word: "Мята".to_string()
                },
                &Outcome::Invalid {
                    reason: "invalid coefficient '1 2'".to_string()
                },
            ]
        );
        assert_eq!(r.items[0].coefficient, 2);
        assert_eq!(r.items[2].coefficient, 3);
        assert_eq!(r.disclosure().unwrap(), "interpreting netle as nettle");
        assert!(!r.is_complete());
    }
}
