//! # Brain Module
//!
//! The matching/ranking engine of SecAware. Answers free-text cybersecurity
//! questions by matching input against the curated knowledge base, with no
//! model calls: pure tokenization, rewriting and scoring.
//!
//! ## Components
//! - `tokenizer`: input splitting and stopword filtering
//! - `synonyms`: phrase rewriting to canonical keywords (fast path guard)
//! - `sentiment`: emotional-cue detection and empathetic intros
//! - `matcher`: literal keyword and whole-word chit-chat matching
//! - `fuzzy`: token-overlap + edit-distance scoring with a confidence floor
//! - `rotation`: related-tip selection and fallback responses
//! - `context`: per-session memory, follow-ups and personalization
//! - `engine`: main orchestrator

pub mod context;
pub mod engine;
pub mod fuzzy;
pub mod matcher;
pub mod rotation;
pub mod sentiment;
pub mod synonyms;
pub mod tokenizer;

// Re-export main types for convenience
#[allow(unused_imports)]
pub use engine::Engine;
#[allow(unused_imports)]
pub use fuzzy::{ScoringWeights, MIN_CONFIDENCE};
#[allow(unused_imports)]
pub use rotation::FALLBACK_RESPONSES;
