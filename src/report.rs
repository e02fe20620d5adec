// WHY: Plain-text rendering of an analysis for terminal output
// JSON output goes straight through serde; this is the human-readable variant

use std::fmt;

use crate::objection_analyzer::{AnalysisResult, DetectedObjection};

/// Multi-line text view of an analysis
pub struct TextReport<'a>(pub &'a AnalysisResult);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(f, "Reply likelihood: {}% ({})", result.reply_likelihood, result.assessment_label)?;
        writeln!(
            f,
            "Words: {}  Question: {}  Personalization: {}",
            result.word_count,
            yes_no(result.has_question),
            yes_no(result.has_personalization)
        )?;

        if result.objections.is_empty() {
            return writeln!(f, "\nNo objections predicted.");
        }

        writeln!(f, "\nPredicted objections ({}):", result.objections.len())?;
        for (rank, objection) in result.objections.iter().enumerate() {
            write_objection(f, rank + 1, objection)?;
        }
        if result.is_truncated() {
            writeln!(
                f,
                "\n({} more objection(s) detected but not shown)",
                result.total_detected - result.objections.len()
            )?;
        }
        Ok(())
    }
}

/// Render an analysis as a multi-line text report
pub fn format_text_report(result: &AnalysisResult) -> String {
    TextReport(result).to_string()
}

fn write_objection(f: &mut fmt::Formatter<'_>, rank: usize, objection: &DetectedObjection) -> fmt::Result {
    writeln!(
        f,
        "\n{rank}. {} [{}] - {} (score {})",
        objection.name, objection.severity, objection.bias, objection.score
    )?;
    writeln!(f, "   \"{}\"", objection.description)?;
    if !objection.trigger_matches.is_empty() {
        writeln!(f, "   Triggers: {}", objection.trigger_matches.join(", "))?;
    }
    if !objection.mitigation_matches.is_empty() {
        writeln!(f, "   Mitigated by: {}", objection.mitigation_matches.join(", "))?;
    }
    writeln!(f, "   Reframe: {}", objection.reframe)
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
