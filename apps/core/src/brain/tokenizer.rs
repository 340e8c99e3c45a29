//! Input tokenization.
//!
//! Splits raw text into a set of significant lowercase tokens. Punctuation
//! and whitespace act as separators, stopwords and very short tokens are
//! dropped. Only the overlap ratio matters downstream, so the output is a
//! set: duplicates collapse and order is irrelevant.

use std::collections::HashSet;

/// Words carrying no topical signal, removed after lowercasing.
pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "of", "to", "in", "on", "for", "is", "are", "do", "does",
    "did", "how", "what", "why", "when", "where", "who", "my", "your", "our", "their", "i",
    "you", "we", "they", "it", "me", "us", "can", "could", "should", "would", "will", "was",
    "were", "be", "been", "have", "has", "had", "not", "but", "if", "at", "by", "as", "so",
    "about", "with", "from", "that", "this", "tell", "please",
];

/// Tokens shorter than this (after stripping) are discarded.
const MIN_TOKEN_LEN: usize = 3;

/// Separator characters, in addition to whitespace.
const SEPARATORS: &[char] = &['.', ',', '?', '!', '-', '\''];

/// Tokenize `text` into its set of significant words.
///
/// Deterministic and side-effect free; empty input yields an empty set.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .filter(|word| word.len() >= MIN_TOKEN_LEN && !STOPWORDS.contains(word))
        .map(str::to_string)
        .collect()
}
