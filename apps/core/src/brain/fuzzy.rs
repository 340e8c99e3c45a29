//! Fuzzy scoring.
//!
//! Fallback matcher: every remaining knowledge entry is scored against the
//! input with a weighted combination of token-overlap ratio and normalized
//! Levenshtein similarity, and the best entry above the confidence floor
//! wins. Ties keep the first-encountered candidate, so iteration order (store
//! id order) makes the result deterministic.

use super::tokenizer;
use crate::models::KnowledgeEntry;

/// Minimum score required to accept a fuzzy match instead of the fallback.
pub const MIN_CONFIDENCE: f32 = 0.3;

/// Weights for the two score components. Both default to 0.5: a historical
/// variant used 0.6/0.4, but the even split is the documented choice here.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    /// Weight of the token-overlap ratio.
    pub overlap: f32,
    /// Weight of the edit-distance similarity.
    pub similarity: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            overlap: 0.5,
            similarity: 0.5,
        }
    }
}

/// Classic Levenshtein distance (insert/delete/substitute, cost 1 each) over
/// the full strings, case-insensitive. The complete O(n*m) table is computed;
/// no early termination, for exactness.
pub fn edit_distance(s: &str, t: &str) -> usize {
    let s: Vec<char> = s.to_lowercase().chars().collect();
    let t: Vec<char> = t.to_lowercase().chars().collect();
    let (n, m) = (s.len(), t.len());

    let mut dp = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=m {
        dp[0][j] = j;
    }

    for i in 1..=n {
        for j in 1..=m {
            let cost = usize::from(s[i - 1] != t[j - 1]);
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }

    dp[n][m]
}

/// Normalized similarity in [0, 1]: identical strings score 1.0.
pub fn similarity(s: &str, t: &str) -> f32 {
    let max_len = s.chars().count().max(t.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - edit_distance(s, t) as f32 / max_len as f32
}

/// Score one candidate keyword against the input.
///
/// The overlap ratio is `|keyword tokens ∩ input tokens| / |keyword tokens|`
/// (0 when the keyword has no significant tokens), deliberately asymmetric:
/// a fully covered short keyword scores 1.0 even inside a long question.
pub fn score(input: &str, keyword: &str, weights: &ScoringWeights) -> f32 {
    let input_tokens = tokenizer::tokenize(input);
    let keyword_tokens = tokenizer::tokenize(keyword);

    let overlap = if keyword_tokens.is_empty() {
        0.0
    } else {
        let shared = keyword_tokens
            .iter()
            .filter(|t| input_tokens.contains(*t))
            .count();
        shared as f32 / keyword_tokens.len() as f32
    };

    weights.overlap * overlap + weights.similarity * similarity(input, keyword)
}

/// Best-scoring entry at or above [`MIN_CONFIDENCE`], or `None` when even the
/// best candidate is too weak a guess. Strictly-greater comparison keeps the
/// first-encountered entry on ties.
pub fn best_match<'a>(
    input: &str,
    entries: impl IntoIterator<Item = &'a KnowledgeEntry>,
    weights: &ScoringWeights,
) -> Option<(&'a KnowledgeEntry, f32)> {
    let mut best: Option<(&KnowledgeEntry, f32)> = None;

    for entry in entries {
        let s = score(input, &entry.keyword, weights);
        match best {
            Some((_, current)) if s <= current => {}
            _ => best = Some((entry, s)),
        }
    }

    best.filter(|(_, s)| *s >= MIN_CONFIDENCE)
}
