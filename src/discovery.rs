use anyhow::Result;
use futures::stream::{Stream, StreamExt};
use glob::glob;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// File name pattern for outreach drafts
pub const DRAFT_GLOB: &str = "**/*.txt";

/// Configuration for draft discovery behavior
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
}

/// Result of draft discovery validation
#[derive(Debug, Clone)]
pub struct DraftValidation {
    pub path: PathBuf,
    pub error: Option<String>,
}

impl DraftValidation {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Discovers all files matching `**/*.txt` recursively under the given root directory.
/// Returns an async stream of validated draft paths.
///
/// # Arguments
/// * `root_dir` - Root directory to search recursively
/// * `config` - Discovery configuration (fail_fast behavior)
pub fn discover_drafts(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> impl Stream<Item = Result<DraftValidation>> {
    let root_path = root_dir.as_ref().to_path_buf();

    futures::stream::unfold(
        DiscoveryState::new(root_path, config),
        |mut state| async move {
            state.next_draft().await.map(|result| (result, state))
        }
    )
}

/// Internal state for draft discovery iteration
struct DiscoveryState {
    root_dir: PathBuf,
    config: DiscoveryConfig,
    glob_iter: Option<glob::Paths>,
}

impl DiscoveryState {
    fn new(root_dir: PathBuf, config: DiscoveryConfig) -> Self {
        Self {
            root_dir,
            config,
            glob_iter: None,
        }
    }

    async fn next_draft(&mut self) -> Option<Result<DraftValidation>> {
        // Initialize glob iterator on first call
        if self.glob_iter.is_none() {
            let escaped_root = glob::Pattern::escape(&self.root_dir.to_string_lossy());
            let pattern = format!("{escaped_root}/{DRAFT_GLOB}");
            debug!("Starting draft discovery with pattern: {}", pattern);

            match glob(&pattern) {
                Ok(paths) => {
                    self.glob_iter = Some(paths);
                    info!("Draft discovery initialized for root: {}", self.root_dir.display());
                }
                Err(e) => {
                    return Some(Err(anyhow::anyhow!("Failed to create glob pattern: {}", e)));
                }
            }
        }

        let glob_iter = self.glob_iter.as_mut()?;
        loop {
            match glob_iter.next() {
                Some(Ok(path)) => {
                    debug!("Found draft: {}", path.display());
                    return Some(validate_draft(path, &self.config).await);
                }
                Some(Err(e)) => {
                    let error_msg = format!("Glob iteration error: {e}");
                    warn!("{}", error_msg);

                    if self.config.fail_fast {
                        return Some(Err(anyhow::anyhow!(error_msg)));
                    }
                    // Continue to next path on non-fatal glob errors
                }
                None => {
                    info!("Draft discovery completed");
                    return None;
                }
            }
        }
    }
}

/// Check that a discovered path is an accessible regular file
async fn validate_draft(path: PathBuf, config: &DiscoveryConfig) -> Result<DraftValidation> {
    match fs::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => Ok(DraftValidation { path, error: None }),
        Ok(_) => {
            let error = format!("Path is not a file: {}", path.display());
            warn!("{}", error);
            Ok(DraftValidation { path, error: Some(error) })
        }
        Err(e) => {
            let error = format!("Cannot access file {}: {}", path.display(), e);
            warn!("{}", error);

            if config.fail_fast {
                Err(anyhow::anyhow!(error))
            } else {
                Ok(DraftValidation { path, error: Some(error) })
            }
        }
    }
}

/// Collect all discovered drafts into a Vec, sorted by path
pub async fn collect_discovered_drafts(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> Result<Vec<DraftValidation>> {
    let mut drafts = Vec::new();
    let mut stream = Box::pin(discover_drafts(root_dir, config));

    while let Some(result) = stream.next().await {
        drafts.push(result?);
    }
    drafts.sort_by(|a, b| a.path.cmp(&b.path));

    let valid_count = drafts.iter().filter(|d| d.is_valid()).count();
    let invalid_count = drafts.len() - valid_count;
    if invalid_count > 0 {
        warn!("Found {} drafts with validation issues", invalid_count);
    }
    info!("Draft discovery summary: {} valid, {} invalid", valid_count, invalid_count);

    Ok(drafts)
}
