// WHY: Concurrent analysis of a directory of drafts for the batch CLI
// Each draft yields one report file and one stats entry; stats are written as JSON at the end

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

use crate::discovery::{self, DiscoveryConfig};
use crate::incremental::{generate_report_path, write_report};
use crate::objection_analyzer::ObjectionAnalyzer;
use crate::reader::{AsyncDraftReader, ReaderConfig};

const PROGRESS_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} drafts {msg}";

/// Configuration for a batch run
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Re-analyze drafts that already have a report
    pub overwrite_all: bool,
    /// Abort on first error
    pub fail_fast: bool,
    /// Upper bound on drafts analyzed at once
    pub max_concurrent: usize,
    pub show_progress: bool,
    /// Analyze without truncating to the displayed objections
    pub include_all: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            overwrite_all: false,
            fail_fast: false,
            max_concurrent: num_cpus::get().max(1),
            show_progress: false,
            include_all: false,
        }
    }
}

/// Outcome of processing one draft
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    Success,
    /// Report already present and overwrite was not requested
    Skipped,
    /// Draft held only whitespace; no report written
    Empty,
    Failed,
}

/// Per-draft processing statistics
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DraftStats {
    /// Draft path relative to the root directory
    pub path: String,
    pub word_count: usize,
    pub reply_likelihood: Option<u8>,
    pub objections_detected: usize,
    pub processing_time_ms: u64,
    pub status: DraftStatus,
    /// Error message if processing failed
    pub error: Option<String>,
}

/// Summary of a batch run
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunStats {
    pub run_start_utc: u64,
    pub run_duration_ms: u64,
    pub drafts_processed: usize,
    pub drafts_skipped: usize,
    pub drafts_empty: usize,
    pub drafts_failed: usize,
    /// Mean likelihood over successfully analyzed drafts
    pub average_reply_likelihood: Option<f64>,
    pub drafts: Vec<DraftStats>,
}

impl RunStats {
    fn from_drafts(run_start_utc: u64, run_duration_ms: u64, mut drafts: Vec<DraftStats>) -> Self {
        drafts.sort_by(|a, b| a.path.cmp(&b.path));
        let count = |status: DraftStatus| drafts.iter().filter(|d| d.status == status).count();

        let likelihoods: Vec<f64> = drafts.iter()
            .filter(|d| d.status == DraftStatus::Success)
            .filter_map(|d| d.reply_likelihood)
            .map(f64::from)
            .collect();
        let average_reply_likelihood = if likelihoods.is_empty() {
            None
        } else {
            Some(likelihoods.iter().sum::<f64>() / likelihoods.len() as f64)
        };

        Self {
            run_start_utc,
            run_duration_ms,
            drafts_processed: count(DraftStatus::Success),
            drafts_skipped: count(DraftStatus::Skipped),
            drafts_empty: count(DraftStatus::Empty),
            drafts_failed: count(DraftStatus::Failed),
            average_reply_likelihood,
            drafts,
        }
    }

    /// Write stats as pretty JSON
    pub async fn write_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await
            .with_context(|| format!("Failed to write stats to {}", path.display()))?;
        Ok(())
    }
}

/// Whether a draft still needs analysis
pub fn should_process_draft(draft_path: &Path, overwrite_all: bool) -> bool {
    overwrite_all || !generate_report_path(draft_path).exists()
}

/// Discover, analyze and report on every draft under `root_dir`
pub async fn process_drafts_parallel(
    root_dir: &Path,
    analyzer: ObjectionAnalyzer,
    config: &BatchConfig,
) -> Result<RunStats> {
    let run_start = Instant::now();
    let run_start_utc = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    let discovery_config = DiscoveryConfig { fail_fast: config.fail_fast };
    let drafts = discovery::collect_discovered_drafts(root_dir, discovery_config).await?;

    let progress = if config.show_progress {
        let bar = ProgressBar::new(drafts.len() as u64);
        bar.set_style(ProgressStyle::with_template(PROGRESS_TEMPLATE)?.progress_chars("=>-"));
        bar
    } else {
        ProgressBar::hidden()
    };

    let reader = AsyncDraftReader::new(ReaderConfig { fail_fast: config.fail_fast, ..Default::default() });
    let mut results = stream::iter(drafts.into_iter())
        .map(|draft| {
            let reader = &reader;
            let progress = &progress;
            async move {
                let stats = if let Some(error) = draft.error {
                    Ok(failed_stats(root_dir, &draft.path, error))
                } else {
                    process_single_draft(root_dir, &draft.path, reader, analyzer, config).await
                };
                progress.inc(1);
                stats
            }
        })
        .buffer_unordered(config.max_concurrent.max(1));

    let mut draft_stats = Vec::new();
    while let Some(result) = results.next().await {
        match result {
            Ok(stats) => draft_stats.push(stats),
            Err(e) => {
                progress.abandon_with_message("failed");
                return Err(e);
            }
        }
    }
    drop(results);
    progress.finish_with_message("done");

    let run_stats = RunStats::from_drafts(run_start_utc, run_start.elapsed().as_millis() as u64, draft_stats);
    info!(
        processed = run_stats.drafts_processed,
        skipped = run_stats.drafts_skipped,
        empty = run_stats.drafts_empty,
        failed = run_stats.drafts_failed,
        "Batch run completed in {}ms",
        run_stats.run_duration_ms
    );
    Ok(run_stats)
}

async fn process_single_draft(
    root_dir: &Path,
    draft_path: &Path,
    reader: &AsyncDraftReader,
    analyzer: ObjectionAnalyzer,
    config: &BatchConfig,
) -> Result<DraftStats> {
    let start = Instant::now();
    let mut stats = DraftStats {
        path: relative_path(root_dir, draft_path),
        word_count: 0,
        reply_likelihood: None,
        objections_detected: 0,
        processing_time_ms: 0,
        status: DraftStatus::Skipped,
        error: None,
    };

    if !should_process_draft(draft_path, config.overwrite_all) {
        return Ok(stats);
    }

    let (text, read_stats) = reader.read_draft(draft_path).await?;
    if let Some(error) = read_stats.read_error {
        return Ok(failed_stats(root_dir, draft_path, error));
    }

    let analysis = if config.include_all {
        analyzer.analyze_all(&text)
    } else {
        analyzer.analyze(&text)
    };

    match analysis {
        Some(result) => {
            if let Err(e) = write_report(draft_path, &result).await {
                let error = format!("Failed to write report for {}: {}", draft_path.display(), e);
                if config.fail_fast {
                    anyhow::bail!(error);
                }
                warn!("{}", error);
                return Ok(failed_stats(root_dir, draft_path, error));
            }
            stats.word_count = result.word_count;
            stats.reply_likelihood = Some(result.reply_likelihood);
            stats.objections_detected = result.total_detected;
            stats.status = DraftStatus::Success;
        }
        None => stats.status = DraftStatus::Empty,
    }

    stats.processing_time_ms = start.elapsed().as_millis() as u64;
    Ok(stats)
}

fn failed_stats(root_dir: &Path, draft_path: &Path, error: String) -> DraftStats {
    DraftStats {
        path: relative_path(root_dir, draft_path),
        word_count: 0,
        reply_likelihood: None,
        objections_detected: 0,
        processing_time_ms: 0,
        status: DraftStatus::Failed,
        error: Some(error),
    }
}

fn relative_path(root_dir: &Path, draft_path: &Path) -> String {
    draft_path.strip_prefix(root_dir)
        .map(PathBuf::from)
        .unwrap_or_else(|_| draft_path.to_path_buf())
        .display()
        .to_string()
}
