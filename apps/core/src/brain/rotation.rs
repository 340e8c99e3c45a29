//! Tip rotation and fallback responses.
//!
//! Given the tips of a resolved category, pick one: uniformly at random for
//! first-touch answers, or "the one after the last returned, wrapping" when
//! the caller is resolving an explicit more/another/next follow-up. The RNG
//! is injected so the engine stays deterministic under test.

use rand::Rng;

/// Canned responses used when nothing matched at all. Selection is random;
/// tests assert membership only.
pub const FALLBACK_RESPONSES: &[&str] = &[
    "I'm not sure about that. Try asking about passwords, phishing or Wi-Fi.",
    "That's a tricky one! Could you rephrase it?",
    "I don't know that yet, but I'm learning. Try a different question.",
];

/// One uniformly random tip, or `None` for an empty category.
pub fn random_tip<'a, R: Rng>(tips: &'a [String], rng: &mut R) -> Option<&'a str> {
    if tips.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..tips.len());
    Some(tips[idx].as_str())
}

/// The tip after `last` in rotation order, wrapping to the first. Falls back
/// to the first tip when `last` is unknown or was the final element.
pub fn next_tip<'a>(tips: &'a [String], last: Option<&str>) -> Option<&'a str> {
    let first = tips.first()?;
    let Some(last) = last else {
        return Some(first.as_str());
    };

    match tips.iter().position(|t| t == last) {
        Some(idx) if idx + 1 < tips.len() => Some(tips[idx + 1].as_str()),
        _ => Some(first.as_str()),
    }
}

/// One random entry from the global fallback set.
pub fn fallback_response<R: Rng>(rng: &mut R) -> &'static str {
    FALLBACK_RESPONSES[rng.gen_range(0..FALLBACK_RESPONSES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tips() -> Vec<String> {
        vec!["first".to_string(), "second".to_string(), "third".to_string()]
    }

    #[test]
    fn test_random_tip_membership_and_determinism() {
        let tips = tips();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        for _ in 0..10 {
            let tip_a = random_tip(&tips, &mut a).expect("non-empty");
            let tip_b = random_tip(&tips, &mut b).expect("non-empty");
            assert_eq!(tip_a, tip_b);
            assert!(tips.iter().any(|t| t == tip_a));
        }
    }

    #[test]
    fn test_random_tip_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_tip(&[], &mut rng).is_none());
    }

    #[test]
    fn test_next_tip_advances_and_wraps() {
        let tips = tips();
        assert_eq!(next_tip(&tips, Some("first")), Some("second"));
        assert_eq!(next_tip(&tips, Some("second")), Some("third"));
        // Final element wraps back to the start.
        assert_eq!(next_tip(&tips, Some("third")), Some("first"));
    }

    #[test]
    fn test_next_tip_unknown_last_starts_over() {
        let tips = tips();
        assert_eq!(next_tip(&tips, None), Some("first"));
        assert_eq!(next_tip(&tips, Some("never returned")), Some("first"));
    }

    #[test]
    fn test_next_tip_single_entry_repeats() {
        let tips = vec!["only".to_string()];
        assert_eq!(next_tip(&tips, Some("only")), Some("only"));
    }

    #[test]
    fn test_fallback_membership() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert!(FALLBACK_RESPONSES.contains(&fallback_response(&mut rng)));
        }
    }
}
