// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub mod fixtures;

/// Test fixture helper for creating temporary directories of outreach drafts
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Create a draft file with given content
    pub fn create_draft<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        // Create parent directories if needed
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write draft");
        file_path
    }

    /// Report path matching the main implementation
    pub fn report_path<P: AsRef<Path>>(&self, draft_path: P) -> PathBuf {
        objection_predictor::generate_report_path(draft_path.as_ref())
    }

    /// Read and parse a report as generic JSON
    pub fn read_report_json<P: AsRef<Path>>(&self, draft_path: P) -> serde_json::Value {
        let content = fs::read_to_string(self.report_path(draft_path)).expect("Failed to read report");
        serde_json::from_str(&content).expect("Report should be valid JSON")
    }

    /// Path for a stats file inside the fixture root
    pub fn stats_path(&self) -> PathBuf {
        self.root_path.join("run_stats.json")
    }
}

/// Build a draft of exactly `words` whitespace-separated filler tokens
pub fn filler_words(words: usize) -> String {
    vec!["lorem"; words].join(" ")
}
