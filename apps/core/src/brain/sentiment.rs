//! Sentiment cue detection.
//!
//! Detects emotional cue phrases and supplies the empathetic preamble that
//! the engine prepends to the reply. Declaration order is match order, and
//! the first matching cue wins, so results stay deterministic. A sentiment
//! match short-circuits the rest of the pipeline for that turn.

use crate::error::AppError;

/// Maps one emotional cue phrase to an empathetic preamble.
#[derive(Debug, Clone, Copy)]
pub struct SentimentRule {
    /// Cue phrase, matched by case-insensitive containment.
    pub cue: &'static str,
    /// Preamble prepended to the body of the reply.
    pub intro: &'static str,
}

/// The shipped cue table. Declaration order is match order.
pub const SENTIMENT_RULES: &[SentimentRule] = &[
    SentimentRule {
        cue: "worried",
        intro: "It's completely understandable to feel worried.",
    },
    SentimentRule {
        cue: "scared",
        intro: "There's no need to panic. Asking is already the right first step.",
    },
    SentimentRule {
        cue: "anxious",
        intro: "Take a breath. Staying safe online is easier than it looks.",
    },
    SentimentRule {
        cue: "overwhelmed",
        intro: "One step at a time. Nobody learns all of this at once.",
    },
    SentimentRule {
        cue: "frustrated",
        intro: "I hear you. Security can feel like a moving target.",
    },
    SentimentRule {
        cue: "confused",
        intro: "No problem, let's clear that up together.",
    },
    SentimentRule {
        cue: "curious",
        intro: "Great, curiosity is the first step to staying safe.",
    },
];

/// Return the first rule whose cue appears in `input`, if any.
pub fn detect(input: &str) -> Option<&'static SentimentRule> {
    let lower = input.to_lowercase();
    SENTIMENT_RULES.iter().find(|rule| lower.contains(rule.cue))
}

/// Startup validation: every cue and intro must be non-blank, cues must be
/// lowercase so containment checks behave as declared.
pub fn validate_rules(rules: &[SentimentRule]) -> Result<(), AppError> {
    for rule in rules {
        if rule.cue.trim().is_empty() || rule.intro.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "sentiment rule has a blank field: {:?}",
                rule
            )));
        }
        if rule.cue != rule.cue.to_lowercase() {
            return Err(AppError::Validation(format!(
                "sentiment cue must be lowercase: '{}'",
                rule.cue
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_cue_case_insensitively() {
        let rule = detect("I'm WORRIED about phishing").expect("cue should match");
        assert_eq!(rule.cue, "worried");
    }

    #[test]
    fn test_no_cue_no_match() {
        assert!(detect("tell me about passwords").is_none());
    }

    #[test]
    fn test_first_declared_cue_wins() {
        // Both cues present; "worried" is declared before "confused".
        let rule = detect("I'm confused and worried").expect("cue should match");
        assert_eq!(rule.cue, "worried");
    }

    #[test]
    fn test_shipped_table_validates() {
        assert!(validate_rules(SENTIMENT_RULES).is_ok());
    }

    #[test]
    fn test_blank_intro_rejected() {
        let rules = &[SentimentRule { cue: "sad", intro: "" }];
        assert!(validate_rules(rules).is_err());
    }
}
