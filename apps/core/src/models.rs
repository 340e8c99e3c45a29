use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Category reserved for literal chit-chat entries, matched by whole-word
/// containment instead of scoring.
pub const GENERAL_CATEGORY: &str = "General";

/// A single row of the curated knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct KnowledgeEntry {
    /// Unique, monotonically increasing row id.
    pub id: i64,
    /// The stored trigger phrase associated with this entry.
    pub keyword: String,
    /// The canned answer returned when this entry is selected.
    pub answer: String,
    /// Topical grouping used for tip rotation and personalization.
    pub category: String,
}

impl KnowledgeEntry {
    /// Whether this entry belongs to the reserved chit-chat category.
    pub fn is_general(&self) -> bool {
        self.category.eq_ignore_ascii_case(GENERAL_CATEGORY)
    }
}

/// The result of one engine lookup: the answer to print and the category it
/// resolved to. The category is empty when no topic could be determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotReply {
    /// The response text shown to the user.
    pub answer: String,
    /// The resolved category, or empty when unresolved.
    pub category: String,
}

impl BotReply {
    /// A reply with a resolved category.
    pub fn new(answer: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            category: category.into(),
        }
    }

    /// A reply that could not be tied to any topic.
    pub fn unresolved(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            category: String::new(),
        }
    }
}
