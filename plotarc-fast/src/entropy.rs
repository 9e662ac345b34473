//! Mixed-message entropy: how much a text flips between positive and
//! negative words.
//!
//! Each token is reduced to the sign of its sentiment (-1, 0, +1). Shannon
//! entropy over the sign distribution measures volatility; dividing by the
//! token count gives a length-normalized "metric entropy" that is comparable
//! across texts of different sizes.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MixedMessages {
    /// Shannon entropy in bits
    pub entropy: f64,
    /// `entropy / tokens.len()`, counting neutral tokens even when removed
    pub metric_entropy: f64,
}

/// Entropy of the per-token sentiment signs.
///
/// With `remove_neutral`, zero-valued tokens are dropped from the
/// distribution but still count in the metric-entropy denominator.
/// Empty and single-class distributions give 0, never NaN.
pub fn mixed_message_entropy<S, F>(tokens: &[S], score_fn: F, remove_neutral: bool) -> MixedMessages
where
    S: AsRef<str>,
    F: Fn(&str) -> f64,
{
    if tokens.is_empty() {
        return MixedMessages {
            entropy: 0.0,
            metric_entropy: 0.0,
        };
    }

    // counts[0] = negative, counts[1] = neutral, counts[2] = positive
    let mut counts = [0usize; 3];
    for token in tokens {
        let value = score_fn(token.as_ref());
        let slot = if value > 0.0 {
            2
        } else if value < 0.0 {
            0
        } else {
            1
        };
        counts[slot] += 1;
    }
    if remove_neutral {
        counts[1] = 0;
    }

    let entropy = shannon_entropy(&counts);
    MixedMessages {
        entropy,
        metric_entropy: entropy / tokens.len() as f64,
    }
}

/// `-sum p_i log2 p_i` over the non-empty classes of a count histogram.
pub fn shannon_entropy(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    let h: f64 = counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            p * p.log2()
        })
        .sum();
    // A single class sums to -0.0
    if h == 0.0 {
        0.0
    } else {
        -h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_score(token: &str) -> f64 {
        match token {
            "love" | "loved" | "good" => 1.0,
            "hate" | "hated" | "bad" => -1.0,
            _ => 0.0,
        }
    }

    #[test]
    fn test_uniform_sign_is_zero() {
        let tokens = ["i", "love", "love", "love", "it"];
        let result = mixed_message_entropy(&tokens, toy_score, true);
        assert_eq!(result, MixedMessages { entropy: 0.0, metric_entropy: 0.0 });
    }

    #[test]
    fn test_mixed_signs_are_positive() {
        let tokens = ["i", "loved", "and", "hated", "it"];
        let result = mixed_message_entropy(&tokens, toy_score, true);
        assert!((result.entropy - 1.0).abs() < 1e-12);
        // Denominator is the full token count, neutrals included
        assert!((result.metric_entropy - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_keeping_neutral_raises_entropy() {
        let tokens = ["i", "loved", "and", "hated", "it"];
        let kept = mixed_message_entropy(&tokens, toy_score, false);
        let removed = mixed_message_entropy(&tokens, toy_score, true);
        assert!(kept.entropy > removed.entropy);
        // p = (1/5, 3/5, 1/5)
        let expected = -(0.2f64 * 0.2f64.log2() * 2.0 + 0.6 * 0.6f64.log2());
        assert!((kept.entropy - expected).abs() < 1e-12);
    }

    #[test]
    fn test_all_neutral_is_zero() {
        let tokens = ["the", "cat", "sat"];
        let result = mixed_message_entropy(&tokens, toy_score, true);
        assert_eq!(result.entropy, 0.0);
        assert_eq!(result.metric_entropy, 0.0);
    }

    #[test]
    fn test_empty_tokens() {
        let tokens: [&str; 0] = [];
        let result = mixed_message_entropy(&tokens, toy_score, true);
        assert_eq!(result.entropy, 0.0);
        assert!(!result.metric_entropy.is_nan());
    }

    #[test]
    fn test_shannon_entropy_basics() {
        assert_eq!(shannon_entropy(&[]), 0.0);
        assert_eq!(shannon_entropy(&[0, 0]), 0.0);
        assert_eq!(shannon_entropy(&[5, 0]), 0.0);
        assert!((shannon_entropy(&[2, 2, 2, 2]) - 2.0).abs() < 1e-12);
    }
}
