use super::{normalize, Suggest, SuggestError};

/// Default edit-distance ceiling for fuzzy candidates.
pub const DEFAULT_SCANNER_MAX_DIST: usize = 5;

/// Linear-scan suggester. Every query computes prefix matches and the
/// Levenshtein distance against every vocabulary word.
#[derive(Debug, Clone)]
pub struct ScannerSuggester {
    words: Vec<String>,
    lower: Vec<String>,
    max_dist: usize,
}

impl ScannerSuggester {
    pub fn new(words: Vec<String>, max_dist: usize) -> Self {
        let lower = words.iter().map(|w| normalize(w)).collect();
        Self {
            words,
            lower,
            max_dist,
        }
    }
}

impl Suggest for ScannerSuggester {
    /// Prefix completions come first (shortest first, at most `max_size - 2` of them
    /// but always at least one), followed by the closest words by edit distance
    /// up to `max_dist`. An empty query prefix-matches every word.
    fn suggest(&self, query: &str, max_size: usize) -> Result<Vec<String>, SuggestError> {
        let query = normalize(query);

        let mut prefixed: Vec<usize> = Vec::new();
        let mut by_dist: Vec<(usize, usize)> = Vec::with_capacity(self.words.len());
        for (i, cand) in self.lower.iter().enumerate() {
            if cand.starts_with(&query) {
                prefixed.push(i);
            }
            by_dist.push((strsim::levenshtein(&query, cand), i));
        }

        // Both sorts are stable: ties keep vocabulary order.
        prefixed.sort_by_key(|&i| self.lower[i].chars().count());
        by_dist.sort_by_key(|&(d, _)| d);

        let num_prefixed = prefixed.len().min(max_size.saturating_sub(2).max(1)).min(max_size);
        let mut out: Vec<usize> = prefixed[..num_prefixed].to_vec();

        for (dist, i) in by_dist {
            if out.len() >= max_size || dist > self.max_dist {
                break;
            }
            if out.contains(&i) {
                continue;
            }
            out.push(i);
        }

        Ok(out.into_iter().map(|i| self.words[i].clone()).collect())
    }
}
