//! Exact and category matching.
//!
//! Two literal strategies tried before any fuzzy scoring:
//! 1. keyword containment against the keyword→category index, in store
//!    insertion order, first match wins;
//! 2. whole-word matching of `"General"` chit-chat keywords, so a short
//!    chit-chat phrase cannot fire inside an unrelated longer word.

use crate::models::KnowledgeEntry;
use regex::Regex;

/// Strategy 1: first indexed keyword contained in `input`, returning its
/// category. The index holds `(keyword, category)` pairs in insertion order
/// with `"General"` entries excluded; matching is case-insensitive.
pub fn keyword_category<'a>(input: &str, index: &'a [(String, String)]) -> Option<&'a str> {
    let lower = input.to_lowercase();
    index
        .iter()
        .find(|(keyword, _)| lower.contains(keyword.as_str()))
        .map(|(_, category)| category.as_str())
}

/// Strategy 2: first `"General"` entry whose keyword occurs in `input` as a
/// whole word. The answer is returned verbatim by the caller, no rotation.
pub fn chitchat_entry<'a>(
    input: &str,
    entries: impl IntoIterator<Item = &'a KnowledgeEntry>,
) -> Option<&'a KnowledgeEntry> {
    entries.into_iter().filter(|e| e.is_general()).find(|e| {
        word_boundary_regex(&e.keyword)
            .map(|re| re.is_match(input))
            .unwrap_or(false)
    })
}

/// Build a case-insensitive whole-word matcher for a stored keyword. The
/// keyword is escaped, so stored punctuation is matched literally.
fn word_boundary_regex(keyword: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword))).ok()
}
