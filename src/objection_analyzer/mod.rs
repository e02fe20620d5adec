// WHY: Main analyzer interface: pattern evaluation, ranking and aggregate scoring
// Pure over its input and the static catalog; the deferred variant lives in crate::scheduler

use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod catalog;
pub mod normalization;
pub mod scoring;

// Re-export core types
pub use catalog::{find_pattern, ObjectionPattern, OBJECTION_PATTERNS, PERSONALIZATION_PHRASES};
pub use normalization::{count_words, is_blank, NormalizedDraft};
pub use scoring::{Assessment, Severity};

/// Objections shown to the reader after ranking
pub const MAX_DISPLAYED_OBJECTIONS: usize = 4;

/// A catalog pattern that scored positively against a draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedObjection {
    pub id: String,
    pub name: String,
    pub bias: String,
    pub description: String,
    pub reframe: String,
    pub length_based: bool,
    /// Net score, always positive for retained objections
    pub score: i32,
    /// Triggers that fired, in catalog order
    pub trigger_matches: Vec<String>,
    /// Negative triggers that fired, in catalog order
    pub mitigation_matches: Vec<String>,
    pub severity: Severity,
}

/// Complete analysis of one draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Ranked objections, highest score first
    pub objections: Vec<DetectedObjection>,
    /// Patterns that scored positively before truncation
    pub total_detected: usize,
    /// Sum of scores over every detected pattern
    pub total_risk: i32,
    pub reply_likelihood: u8,
    pub assessment: Assessment,
    pub assessment_label: String,
    pub assessment_color: String,
    pub word_count: usize,
    pub has_question: bool,
    pub has_personalization: bool,
}

impl AnalysisResult {
    /// Whether objections beyond the displayed ones were dropped
    pub fn is_truncated(&self) -> bool {
        self.total_detected > self.objections.len()
    }
}

/// Runs the objection catalog over drafts
#[derive(Debug, Clone, Copy)]
pub struct ObjectionAnalyzer {
    patterns: &'static [ObjectionPattern],
    max_displayed: usize,
}

impl ObjectionAnalyzer {
    /// Create analyzer over a custom catalog
    ///
    /// Returns `None` for an empty catalog, which would leave the risk
    /// normalizer at zero.
    pub fn new(patterns: &'static [ObjectionPattern]) -> Option<Self> {
        if patterns.is_empty() {
            return None;
        }
        Some(Self {
            patterns,
            max_displayed: MAX_DISPLAYED_OBJECTIONS,
        })
    }

    /// Create analyzer over the shipped catalog
    pub fn with_default_patterns() -> Self {
        Self {
            patterns: OBJECTION_PATTERNS,
            max_displayed: MAX_DISPLAYED_OBJECTIONS,
        }
    }

    /// Analyze a draft, keeping the top-ranked objections for display
    ///
    /// Blank input produces no result.
    pub fn analyze(&self, text: &str) -> Option<AnalysisResult> {
        self.analyze_with_limit(text, self.max_displayed)
    }

    /// Analyze a draft without truncating the ranked objections
    pub fn analyze_all(&self, text: &str) -> Option<AnalysisResult> {
        self.analyze_with_limit(text, usize::MAX)
    }

    /// Full ranked set of detected objections for a draft
    pub fn detect(&self, text: &str) -> Vec<DetectedObjection> {
        let draft = NormalizedDraft::new(text);
        self.detect_normalized(&draft)
    }

    fn analyze_with_limit(&self, text: &str, limit: usize) -> Option<AnalysisResult> {
        if is_blank(text) {
            debug!("Skipping analysis of blank draft");
            return None;
        }

        let draft = NormalizedDraft::new(text);
        let mut objections = self.detect_normalized(&draft);

        // WHY: risk covers every detected pattern, not just the displayed ones
        let total_detected = objections.len();
        let total_risk: i32 = objections.iter().map(|o| o.score).sum();
        objections.truncate(limit);

        let has_question = draft.has_question();
        let reply_likelihood = scoring::reply_likelihood(
            total_risk,
            scoring::max_possible_risk(self.patterns.len()),
            draft.word_count,
            has_question,
        );
        let assessment = Assessment::from_likelihood(reply_likelihood);
        let has_personalization = PERSONALIZATION_PHRASES.iter().any(|p| draft.contains(p));

        debug!(
            word_count = draft.word_count,
            total_detected,
            total_risk,
            reply_likelihood,
            "Analyzed draft"
        );

        Some(AnalysisResult {
            objections,
            total_detected,
            total_risk,
            reply_likelihood,
            assessment,
            assessment_label: assessment.label().to_string(),
            assessment_color: assessment.color_class().to_string(),
            word_count: draft.word_count,
            has_question,
            has_personalization,
        })
    }

    fn detect_normalized(&self, draft: &NormalizedDraft) -> Vec<DetectedObjection> {
        let mut detected: Vec<DetectedObjection> = self.patterns.iter()
            .filter_map(|pattern| evaluate_pattern(pattern, draft))
            .collect();

        // Vec::sort_by is stable: equal scores keep catalog order
        detected.sort_by(|a, b| b.score.cmp(&a.score));
        detected
    }
}

impl Default for ObjectionAnalyzer {
    fn default() -> Self {
        Self::with_default_patterns()
    }
}

/// Score one pattern against a normalized draft, dropping non-positive scores
pub fn evaluate_pattern(pattern: &ObjectionPattern, draft: &NormalizedDraft) -> Option<DetectedObjection> {
    let trigger_matches: Vec<String> = pattern.triggers.iter()
        .filter(|trigger| draft.contains(trigger))
        .map(|trigger| trigger.to_string())
        .collect();
    let mitigation_matches: Vec<String> = pattern.negative_triggers.iter()
        .filter(|neg| draft.contains(neg))
        .map(|neg| neg.to_string())
        .collect();

    let mut score = trigger_matches.len() as i32 * scoring::TRIGGER_WEIGHT
        - mitigation_matches.len() as i32 * scoring::MITIGATION_WEIGHT;
    if pattern.length_based {
        score += scoring::length_bonus(draft.word_count);
    }

    if score <= 0 {
        return None;
    }

    Some(DetectedObjection {
        id: pattern.id.to_string(),
        name: pattern.name.to_string(),
        bias: pattern.bias.to_string(),
        description: pattern.description.to_string(),
        reframe: pattern.reframe.to_string(),
        length_based: pattern.length_based,
        score,
        trigger_matches,
        mitigation_matches,
        severity: Severity::from_score(score),
    })
}
