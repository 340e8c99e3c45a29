//! Conversation context.
//!
//! Per-session state carried across turns: the last resolved category and
//! answer (for "more/another/next" follow-ups), a small key-value memory
//! (remembered favorite topic), and the turn history behind `/history`.
//! Owned exclusively by the engine's session; cleared by an explicit reset.

use chrono::Local;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Memory key holding the user's declared favorite topic.
const FAVORITE_TOPIC_KEY: &str = "favoriteTopic";

/// Follow-up phrasing, matched on whole words before any normal lookup.
static FOLLOW_UP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(more|another|what else|next)\b").expect("Invalid regex: follow-up pattern")
});

/// "Declare interest" phrasing that triggers topic memory.
static INTEREST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(interested in|favorite topic)\b").expect("Invalid regex: interest pattern")
});

/// Whether `input` declares a favorite topic.
pub fn declares_interest(input: &str) -> bool {
    INTEREST_RE.is_match(input)
}

/// Mutable state of one chat session.
#[derive(Debug, Default)]
pub struct ConversationState {
    /// Category resolved by the most recent non-follow-up turn.
    pub last_category: Option<String>,
    /// Answer returned by the most recent turn.
    pub last_answer: Option<String>,
    memory: HashMap<String, String>,
    history: Vec<String>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw user input with a wall-clock stamp.
    pub fn push_history(&mut self, input: &str) {
        self.history
            .push(format!("[{}] {}", Local::now().format("%H:%M"), input));
    }

    /// All recorded inputs, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The last category when `input` is follow-up phrasing, `None` otherwise.
    /// Follow-ups only make sense relative to a previous resolved turn.
    pub fn follow_up_category(&self, input: &str) -> Option<String> {
        if FOLLOW_UP_RE.is_match(input) {
            self.last_category.clone()
        } else {
            None
        }
    }

    /// Store the declared favorite topic.
    pub fn remember_favorite(&mut self, topic: &str) {
        self.memory
            .insert(FAVORITE_TOPIC_KEY.to_string(), topic.to_string());
    }

    /// The remembered favorite topic, if any.
    pub fn favorite_topic(&self) -> Option<&str> {
        self.memory.get(FAVORITE_TOPIC_KEY).map(String::as_str)
    }

    /// Overwrite last-turn state after a lookup turn. An unresolved turn
    /// stores the empty category, which no entry carries, so a later
    /// follow-up finds nothing to rotate.
    pub fn record_turn(&mut self, answer: &str, category: &str) {
        self.last_answer = Some(answer.to_string());
        self.last_category = Some(category.to_string());
    }

    /// Prefix `answer` with a personalized lead-in when the resolved category
    /// matches the remembered favorite topic.
    pub fn personalize(&self, answer: String, category: &str) -> String {
        match self.favorite_topic() {
            Some(fav) if !category.is_empty() && category.eq_ignore_ascii_case(fav) => {
                format!("As someone interested in {fav}, here's another tip:\n{answer}")
            }
            _ => answer,
        }
    }

    /// Clear memory, history and last-turn state.
    pub fn reset(&mut self) {
        self.memory.clear();
        self.history.clear();
        self.last_category = None;
        self.last_answer = None;
    }
}
