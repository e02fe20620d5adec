// WHY: Public helpers for per-draft report files used by the batch CLI and tests
// A draft counts as processed once its report exists next to it

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::objection_analyzer::AnalysisResult;

/// Suffix appended to a draft's file stem for its report
pub const REPORT_SUFFIX: &str = "_objections.json";

/// Generate report file path from draft path
pub fn generate_report_path(draft_path: &Path) -> PathBuf {
    let mut report_path = draft_path.to_path_buf();
    let file_stem = report_path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    report_path.set_file_name(format!("{file_stem}{REPORT_SUFFIX}"));
    report_path
}

/// Check if a report exists for the given draft
pub fn report_exists<P: AsRef<Path>>(draft_path: P) -> bool {
    generate_report_path(draft_path.as_ref()).exists()
}

/// Read and parse the report for the given draft
///
/// # Example
/// ```no_run
/// use objection_predictor::incremental::read_report;
/// let result = read_report("drafts/intro.txt").expect("Failed to read report");
/// println!("{}%", result.reply_likelihood);
/// ```
pub fn read_report<P: AsRef<Path>>(draft_path: P) -> Result<AnalysisResult, io::Error> {
    let report_path = generate_report_path(draft_path.as_ref());
    let content = fs::read_to_string(report_path)?;
    serde_json::from_str(&content).map_err(io::Error::from)
}

/// Write the report for a draft as pretty JSON with a trailing newline
pub async fn write_report(draft_path: &Path, result: &AnalysisResult) -> Result<PathBuf, io::Error> {
    let report_path = generate_report_path(draft_path);
    let mut content = serde_json::to_string_pretty(result).map_err(io::Error::from)?;
    content.push('\n');
    tokio::fs::write(&report_path, content).await?;
    Ok(report_path)
}
