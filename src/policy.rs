use serde::Serialize;

use crate::suggester::{normalize, SuggestError};

/// What to do with the suggestions returned for a single query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Decision {
    /// Nothing matched.
    NotFound,

    /// A single candidate. `word` is the canonical entry name. On a
    /// correction, `corrected_from` holds the original query and `suggestion`
    /// the vocabulary word it matched, which may be an alternative name.
    Accepted {
        word: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        corrected_from: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        suggestion: Option<String>,
    },

    /// Several candidates. The user has to pick one.
    Ambiguous { candidates: Vec<String> },

    /// The query matched too much to be ranked.
    TooBroad,
}

impl Decision {
    /// "interpreting X as Y" for accepted corrections.
    pub fn disclosure(&self) -> Option<String> {
        match self {
            Decision::Accepted {
                word,
                corrected_from: Some(from),
                suggestion,
            } => Some(format!(
                "interpreting {} as {}",
                from,
                suggestion.as_deref().unwrap_or(word)
            )),
            _ => None,
        }
    }

    /// End-user message for the decision.
    pub fn message(&self) -> String {
        match self {
            Decision::NotFound => "nothing found, try a different query".to_string(),
            Decision::Accepted { word, .. } => self
                .disclosure()
                .unwrap_or_else(|| format!("found {}", word)),
            Decision::Ambiguous { .. } => "several matches found, pick one".to_string(),
            Decision::TooBroad => "query is too broad, please be more specific".to_string(),
        }
    }
}

/// Turn a suggestion result into a decision. Only a query-time failure
/// (`TooManySuggestions`) becomes a decision; other errors are passed through.
pub fn decide(
    query: &str,
    result: Result<Vec<String>, SuggestError>,
) -> Result<Decision, SuggestError> {
    let mut words = match result {
        Ok(words) => words,
        Err(SuggestError::TooManySuggestions) => return Ok(Decision::TooBroad),
        Err(e) => return Err(e),
    };

    let d = match words.len() {
        0 => Decision::NotFound,
        1 => {
            let word = words.remove(0);
            let (corrected_from, suggestion) = if normalize(&word) == normalize(query) {
                (None, None)
            } else {
                (Some(query.trim().to_string()), Some(word.clone()))
            };
            Decision::Accepted {
                word,
                corrected_from,
                suggestion,
            }
        }
        _ => Decision::Ambiguous { candidates: words },
    };
    Ok(d)
}

/// Outcome of resolving one fragment of a multi-item query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Exact name or synonym.
    Found { word: String },
    /// Best suggestion taken in place of the fragment. `word` is the entry
    /// name, `suggestion` the vocabulary word that matched.
    Corrected { word: String, suggestion: String },
    /// Resolves to an entry that an earlier fragment already resolved to.
    Duplicate { word: String },
    Unrecognized,
    TooBroad,
    Invalid { reason: String },
}

/// A single resolved fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub fragment: String,
    pub coefficient: u32,
    pub outcome: Outcome,
}

/// Result of resolving a list of fragments ("2 mint, sage + 3*nettle").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub items: Vec<Resolved>,
}

impl Resolution {
    /// (fragment, word) pairs for every fragment resolved by correction.
    pub fn substitutions(&self) -> Vec<(&str, &str)> {
        self.items
            .iter()
            .filter_map(|r| match &r.outcome {
                Outcome::Corrected { suggestion, .. } => {
                    Some((r.fragment.as_str(), suggestion.as_str()))
                }
                _ => None,
            })
            .collect()
    }

    /// "interpreting a as b, c as d", if anything was corrected.
    pub fn disclosure(&self) -> Option<String> {
        let subs = self.substitutions();
        if subs.is_empty() {
            return None;
        }

        let parts: Vec<String> = subs
            .iter()
            .map(|(from, to)| format!("{} as {}", from, to))
            .collect();
        Some(format!("interpreting {}", parts.join(", ")))
    }

    /// True when every fragment resolved to a distinct entry.
    pub fn is_complete(&self) -> bool {
        self.items.iter().all(|r| {
            matches!(
                r.outcome,
                Outcome::Found { .. } | Outcome::Corrected { .. }
            )
        })
    }
}

/// Best-guess policy for one fragment: take the top suggestion, if any.
pub fn best_guess(fragment: &str, result: Result<Vec<String>, SuggestError>) -> Outcome {
    match result {
        Ok(words) => match words.into_iter().next() {
            Some(word) if normalize(&word) == normalize(fragment) => Outcome::Found { word },
            Some(word) => Outcome::Corrected {
                suggestion: word.clone(),
                word,
            },
            None => Outcome::Unrecognized,
        },
        Err(SuggestError::TooManySuggestions) => Outcome::TooBroad,
        Err(e) => Outcome::Invalid {
            reason: e.to_string(),
        },
    }
}

/// Split a multi-item query on `,` and `+` into (coefficient, name) pairs.
/// A fragment may start with an integer coefficient, optionally followed by
/// `*` or `-` ("3*nettle", "2 mint"). Empty fragments are skipped.
pub fn split_fragments(text: &str) -> Vec<Result<(u32, String), (String, String)>> {
    text.split([',', '+'])
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(parse_fragment)
        .collect()
}

fn parse_fragment(fragment: &str) -> Result<(u32, String), (String, String)> {
    let split = fragment
        .find(|c: char| !(c.is_ascii_digit() || c == ' '))
        .unwrap_or(fragment.len());
    let (coef, rest) = fragment.split_at(split);

    let coef = coef.trim();
    let coefficient = if coef.is_empty() {
        1
    } else {
        coef.parse::<u32>().map_err(|_| {
            (
                fragment.to_string(),
                format!("invalid coefficient '{}'", coef),
            )
        })?
    };

    let name = rest
        .strip_prefix(['*', '-'])
        .unwrap_or(rest)
        .trim()
        .to_string();
    if name.is_empty() {
        return Err((fragment.to_string(), "missing name".to_string()));
    }
    Ok((coefficient, name))
}
