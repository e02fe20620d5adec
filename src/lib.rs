pub mod objection_analyzer;
pub mod scheduler;
pub mod discovery;
pub mod reader;
pub mod incremental;
pub mod batch;
pub mod report;

// Re-export main types for convenient access
pub use objection_analyzer::{
    AnalysisResult, Assessment, DetectedObjection,
    ObjectionAnalyzer, ObjectionPattern, Severity,
    OBJECTION_PATTERNS
};

// Re-export deferred analysis
pub use scheduler::{AnalysisScheduler, AnalysisState, DEFAULT_ANALYSIS_DELAY};

// Re-export batch processing types and functions
pub use batch::{
    BatchConfig, DraftStats, DraftStatus, RunStats,
    process_drafts_parallel, should_process_draft
};
pub use incremental::{generate_report_path, report_exists, read_report};
pub use report::{format_text_report, TextReport};
