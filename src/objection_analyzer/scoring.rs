// WHY: Scoring constants and tier derivations kept apart from pattern evaluation
// All thresholds are hand-tuned product values and must stay exact

use serde::{Deserialize, Serialize};

/// Points added per matched trigger
pub const TRIGGER_WEIGHT: i32 = 2;
/// Points removed per matched negative trigger
pub const MITIGATION_WEIGHT: i32 = 1;
/// Per-pattern ceiling used to normalize aggregate risk
pub const MAX_RISK_PER_PATTERN: usize = 4;
/// Likelihood deducted from drafts longer than this many words
pub const LONG_DRAFT_WORDS: usize = 100;
pub const LONG_DRAFT_PENALTY: f64 = 10.0;
/// Likelihood added when the draft asks a question
pub const QUESTION_BONUS: f64 = 5.0;

/// Qualitative tier of a single detected objection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Derive severity from a positive net score
    pub fn from_score(score: i32) -> Self {
        if score >= 3 {
            Severity::High
        } else if score >= 2 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall band for a reply likelihood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    Strong,
    Moderate,
    Weak,
    HighRisk,
}

impl Assessment {
    /// Bands: >=70 strong, >=50 moderate, >=30 weak, else high risk
    pub fn from_likelihood(likelihood: u8) -> Self {
        match likelihood {
            70..=u8::MAX => Assessment::Strong,
            50..=69 => Assessment::Moderate,
            30..=49 => Assessment::Weak,
            _ => Assessment::HighRisk,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Assessment::Strong => "Strong - Low psychological resistance expected",
            Assessment::Moderate => "Moderate - Address top 1-2 objections",
            Assessment::Weak => "Weak - Multiple resistance triggers detected",
            Assessment::HighRisk => "High Risk - Consider rewriting with reframes",
        }
    }

    /// Color-class hint for presentation layers
    pub fn color_class(&self) -> &'static str {
        match self {
            Assessment::Strong => "text-green-600",
            Assessment::Moderate => "text-yellow-600",
            Assessment::Weak => "text-orange-600",
            Assessment::HighRisk => "text-red-600",
        }
    }
}

/// Bonus for length-based patterns; tiers are mutually exclusive
pub fn length_bonus(word_count: usize) -> i32 {
    if word_count > 150 {
        3
    } else if word_count > 100 {
        2
    } else if word_count > 75 {
        1
    } else {
        0
    }
}

/// Aggregate risk normalizer for a catalog of `pattern_count` patterns
pub fn max_possible_risk(pattern_count: usize) -> usize {
    pattern_count * MAX_RISK_PER_PATTERN
}

/// Combine total risk, length and question presence into a 0-100 likelihood
///
/// `max_risk` must be positive; a non-empty catalog guarantees it.
pub fn reply_likelihood(total_risk: i32, max_risk: usize, word_count: usize, has_question: bool) -> u8 {
    let risk_share = f64::from(total_risk) / max_risk as f64 * 100.0;
    let length_penalty = if word_count > LONG_DRAFT_WORDS { LONG_DRAFT_PENALTY } else { 0.0 };
    let question_bonus = if has_question { QUESTION_BONUS } else { 0.0 };

    let raw = 100.0 - risk_share - length_penalty + question_bonus;
    // Round half up, then clamp
    (raw + 0.5).floor().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_tiers() {
        assert_eq!(Severity::from_score(1), Severity::Low);
        assert_eq!(Severity::from_score(2), Severity::Medium);
        assert_eq!(Severity::from_score(3), Severity::High);
        assert_eq!(Severity::from_score(14), Severity::High);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Medium).unwrap(), "\"medium\"");
    }

    #[test]
    fn test_length_bonus_thresholds() {
        let cases = [(0, 0), (75, 0), (76, 1), (100, 1), (101, 2), (150, 2), (151, 3), (1000, 3)];
        for (words, expected) in cases {
            assert_eq!(length_bonus(words), expected, "length_bonus({words})");
        }
    }

    #[test]
    fn test_assessment_bands() {
        assert_eq!(Assessment::from_likelihood(100), Assessment::Strong);
        assert_eq!(Assessment::from_likelihood(70), Assessment::Strong);
        assert_eq!(Assessment::from_likelihood(69), Assessment::Moderate);
        assert_eq!(Assessment::from_likelihood(50), Assessment::Moderate);
        assert_eq!(Assessment::from_likelihood(49), Assessment::Weak);
        assert_eq!(Assessment::from_likelihood(30), Assessment::Weak);
        assert_eq!(Assessment::from_likelihood(29), Assessment::HighRisk);
        assert_eq!(Assessment::from_likelihood(0), Assessment::HighRisk);
        assert_eq!(Assessment::HighRisk.color_class(), "text-red-600");
    }

    #[test]
    fn test_reply_likelihood_formula() {
        // 8 / 32 * 100 = 25
        assert_eq!(reply_likelihood(8, 32, 13, true), 80);
        assert_eq!(reply_likelihood(0, 32, 10, false), 100);
        assert_eq!(reply_likelihood(0, 32, 101, false), 90);
        // Bonus cannot push past 100
        assert_eq!(reply_likelihood(0, 32, 5, true), 100);
    }

    #[test]
    fn test_reply_likelihood_rounds_half_up() {
        // 1 / 32 * 100 = 3.125 -> 96.875 -> 97
        assert_eq!(reply_likelihood(1, 32, 5, false), 97);
        // 4 / 32 * 100 = 12.5 -> 87.5 -> 88
        assert_eq!(reply_likelihood(4, 32, 5, false), 88);
    }

    #[test]
    fn test_reply_likelihood_clamps_to_zero() {
        assert_eq!(reply_likelihood(60, 32, 200, false), 0);
    }
}
