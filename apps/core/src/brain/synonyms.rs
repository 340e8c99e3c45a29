//! Synonym normalization.
//!
//! Rewrites known phrases to the canonical keyword phrase the store uses,
//! before any matching runs. Rules are applied in declaration order, and the
//! table is validated at engine construction: no rule's canonical output may
//! contain another rule's trigger phrase, so application order cannot change
//! the result and rewriting is idempotent.

use crate::error::AppError;

/// One rewrite rule: every occurrence of `phrase` becomes `canonical`.
#[derive(Debug, Clone, Copy)]
pub struct SynonymRule {
    /// Trigger phrase, matched case-insensitively.
    pub phrase: &'static str,
    /// Canonical keyword phrase the store recognizes.
    pub canonical: &'static str,
}

/// The shipped rewrite table. Declaration order is application order.
pub const SYNONYM_RULES: &[SynonymRule] = &[
    SynonymRule { phrase: "two-factor authentication", canonical: "2fa" },
    SynonymRule { phrase: "two factor authentication", canonical: "2fa" },
    SynonymRule { phrase: "multi-factor authentication", canonical: "2fa" },
    SynonymRule { phrase: "one time password", canonical: "2fa" },
    SynonymRule { phrase: "wi-fi", canonical: "wifi" },
    SynonymRule { phrase: "wireless network", canonical: "wifi" },
    SynonymRule { phrase: "hotspot", canonical: "wifi" },
    SynonymRule { phrase: "virtual private network", canonical: "vpn" },
    SynonymRule { phrase: "scam email", canonical: "phishing" },
    SynonymRule { phrase: "fake email", canonical: "phishing" },
    SynonymRule { phrase: "suspicious email", canonical: "phishing" },
    SynonymRule { phrase: "passphrase", canonical: "password" },
    SynonymRule { phrase: "passcode", canonical: "password" },
    SynonymRule { phrase: "computer virus", canonical: "malware" },
    SynonymRule { phrase: "ransomware", canonical: "malware" },
    SynonymRule { phrase: "spyware", canonical: "malware" },
    SynonymRule { phrase: "security patch", canonical: "update" },
    SynonymRule { phrase: "compromised", canonical: "hacked" },
    SynonymRule { phrase: "broken into", canonical: "hacked" },
];

/// Rewrite `input` against the shipped table.
///
/// The returned string is lowercased: every later pipeline stage matches
/// case-insensitively, and folding here keeps the literal replacement simple.
/// The input itself is never mutated.
pub fn normalize(input: &str) -> String {
    apply_rules(input, SYNONYM_RULES)
}

/// Rewrite `input` against an explicit rule table, in declaration order.
pub fn apply_rules(input: &str, rules: &[SynonymRule]) -> String {
    let mut text = input.to_lowercase();
    for rule in rules {
        if text.contains(rule.phrase) {
            text = text.replace(rule.phrase, rule.canonical);
        }
    }
    text
}

/// Startup validation: reject a blank or non-lowercase rule, and any table
/// where a rule's canonical output contains any rule's trigger phrase.
/// Equality counts as containment, so a chained table (one rule's output is
/// another rule's trigger) is rejected as order-dependent. The one exemption
/// is a rule rewriting a phrase to itself, which cannot interact.
pub fn validate_rules(rules: &[SynonymRule]) -> Result<(), AppError> {
    for rule in rules {
        if rule.phrase.trim().is_empty() || rule.canonical.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "synonym rule has a blank field: {:?}",
                rule
            )));
        }
        if rule.phrase != rule.phrase.to_lowercase() || rule.canonical != rule.canonical.to_lowercase()
        {
            return Err(AppError::Validation(format!(
                "synonym rule must be lowercase: {:?}",
                rule
            )));
        }
    }
    for (i, rule) in rules.iter().enumerate() {
        for (j, trigger) in rules.iter().enumerate() {
            if i == j && rule.phrase == rule.canonical {
                continue;
            }
            if rule.canonical.contains(trigger.phrase) {
                return Err(AppError::Config(format!(
                    "canonical phrase '{}' contains trigger phrase '{}'",
                    rule.canonical, trigger.phrase
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_to_canonical() {
        assert_eq!(
            normalize("How do I set up a Virtual Private Network?"),
            "how do i set up a vpn?"
        );
        assert_eq!(normalize("is public Wi-Fi safe"), "is public wifi safe");
    }

    #[test]
    fn test_replaces_all_occurrences() {
        let out = normalize("passphrase or passphrase?");
        assert_eq!(out, "password or password?");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("I got a scam email about my passcode");
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_without_triggers_only_lowercased() {
        assert_eq!(normalize("Tell me about Phishing"), "tell me about phishing");
    }

    #[test]
    fn test_shipped_table_validates() {
        assert!(validate_rules(SYNONYM_RULES).is_ok());
    }

    #[test]
    fn test_interacting_rules_rejected() {
        // The canonical output of the first rule contains the trigger of the
        // second, so rewriting would not be idempotent.
        let rules = &[
            SynonymRule { phrase: "virus", canonical: "computer virus" },
            SynonymRule { phrase: "computer", canonical: "machine" },
        ];
        assert!(validate_rules(rules).is_err());

        // Chained rewrites: the first rule's output equals the second rule's
        // trigger, so declaration order decides between "y" and "z".
        let chained = &[
            SynonymRule { phrase: "x", canonical: "y" },
            SynonymRule { phrase: "y", canonical: "z" },
        ];
        assert!(validate_rules(chained).is_err());
    }

    #[test]
    fn test_identity_rule_allowed() {
        let rules = &[SynonymRule { phrase: "wifi", canonical: "wifi" }];
        assert!(validate_rules(rules).is_ok());
    }

    #[test]
    fn test_blank_rule_rejected() {
        let rules = &[SynonymRule { phrase: " ", canonical: "vpn" }];
        assert!(validate_rules(rules).is_err());
    }
}
