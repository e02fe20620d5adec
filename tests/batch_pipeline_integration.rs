// End-to-end tests for batch analysis of a drafts directory
// WHY: Report files and run stats are the batch mode's only outputs

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use objection_predictor::{
    process_drafts_parallel, read_report, report_exists, BatchConfig, DraftStatus, ObjectionAnalyzer,
};

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::{fixtures, TestFixture};

fn config() -> BatchConfig {
    BatchConfig { max_concurrent: 2, ..Default::default() }
}

#[tokio::test]
async fn test_batch_writes_reports_and_stats() {
    let fixture = TestFixture::new();
    let pitch = fixture.create_draft("pitch.txt", fixtures::COLD_PITCH);
    let intro = fixture.create_draft("warm/intro.txt", fixtures::WARM_INTRO);
    let blank = fixture.create_draft("blank.txt", "  \n ");

    let stats = process_drafts_parallel(&fixture.root_path, ObjectionAnalyzer::default(), &config())
        .await
        .expect("Batch run should succeed");

    assert_eq!(stats.drafts_processed, 2);
    assert_eq!(stats.drafts_empty, 1);
    assert_eq!(stats.drafts_failed, 0);
    assert_eq!(stats.average_reply_likelihood, Some(90.0));

    let report = read_report(&pitch).expect("Pitch report should parse");
    assert_eq!(report.reply_likelihood, 80);
    assert!(read_report(&intro).unwrap().has_personalization);
    assert!(!report_exists(&blank));

    let json = fixture.read_report_json(&pitch);
    assert_eq!(json["objections"][0]["id"], "status_quo_bias");
}

#[tokio::test]
async fn test_existing_reports_skipped_unless_overwrite() {
    let fixture = TestFixture::new();
    let draft = fixture.create_draft("pitch.txt", fixtures::COLD_PITCH);
    fs::write(fixture.report_path(&draft), "stale").unwrap();

    let stats = process_drafts_parallel(&fixture.root_path, ObjectionAnalyzer::default(), &config())
        .await
        .unwrap();
    assert_eq!(stats.drafts_skipped, 1);
    assert_eq!(fs::read_to_string(fixture.report_path(&draft)).unwrap(), "stale");

    let overwrite = BatchConfig { overwrite_all: true, ..config() };
    let stats = process_drafts_parallel(&fixture.root_path, ObjectionAnalyzer::default(), &overwrite)
        .await
        .unwrap();
    assert_eq!(stats.drafts_processed, 1);
    assert_eq!(read_report(&draft).unwrap().reply_likelihood, 80);
}

#[tokio::test]
async fn test_invalid_utf8_draft_recorded_as_failed() {
    let fixture = TestFixture::new();
    fixture.create_draft("good.txt", fixtures::KITCHEN_SINK);
    let bad = fixture.root_path.join("bad.txt");
    fs::write(&bad, [0xFF, 0xFE, 0xFD]).unwrap();

    let stats = process_drafts_parallel(&fixture.root_path, ObjectionAnalyzer::default(), &config())
        .await
        .unwrap();

    assert_eq!(stats.drafts_processed, 1);
    assert_eq!(stats.drafts_failed, 1);
    let failed = stats.drafts.iter().find(|d| d.status == DraftStatus::Failed).unwrap();
    assert_eq!(failed.path, "bad.txt");
    assert!(failed.error.as_deref().unwrap().contains("UTF-8"));
}

#[tokio::test]
async fn test_invalid_utf8_draft_aborts_with_fail_fast() {
    let fixture = TestFixture::new();
    fs::write(fixture.root_path.join("bad.txt"), [0xFF, 0xFE]).unwrap();

    let fail_fast = BatchConfig { fail_fast: true, ..config() };
    let result = process_drafts_parallel(&fixture.root_path, ObjectionAnalyzer::default(), &fail_fast).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_stats_written_as_json() {
    let fixture = TestFixture::new();
    fixture.create_draft("pitch.txt", fixtures::HIGH_RISK_PITCH);

    let stats = process_drafts_parallel(&fixture.root_path, ObjectionAnalyzer::default(), &config())
        .await
        .unwrap();
    stats.write_to(&fixture.stats_path()).await.unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(fixture.stats_path()).unwrap()).unwrap();
    assert_eq!(json["drafts_processed"], 1);
    assert_eq!(json["drafts"][0]["status"], "success");
    assert_eq!(json["drafts"][0]["reply_likelihood"], 0);
    assert_eq!(json["drafts"][0]["objections_detected"], 7);
}

#[test]
fn test_cli_json_output_for_inline_text() {
    let output = Command::new(env!("CARGO_BIN_EXE_objection-predictor"))
        .args(["--json", "--text", fixtures::COLD_PITCH])
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run objection-predictor");

    assert!(output.status.success(), "CLI failed: {}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["reply_likelihood"], 80);
    assert_eq!(json["has_question"], true);
}

#[test]
fn test_cli_blank_text_is_not_an_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_objection-predictor"))
        .args(["--text", "   "])
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run objection-predictor");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

fn run_interactive(input: &str) -> Vec<serde_json::Value> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_objection-predictor"))
        .args(["--interactive", "--json", "--delay-ms", "50"])
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run objection-predictor");
    child.stdin.take().unwrap().write_all(input.as_bytes()).unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "CLI failed: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::Deserializer::from_slice(&output.stdout)
        .into_iter::<serde_json::Value>()
        .collect::<Result<_, _>>()
        .expect("stdout should be a sequence of JSON results")
}

#[test]
fn test_cli_interactive_analyzes_whole_multiline_draft() {
    let input = "Hi Sam, I am reaching out about a new, innovative solution.\n\
                 Would you have time for a quick call this week?\n\
                 Thanks\n";
    let results = run_interactive(input);

    let last = results.last().expect("Interactive mode should print a result");
    assert_eq!(last["word_count"], 22);
    assert_eq!(last["reply_likelihood"], 83);
    assert_eq!(last["objections"].as_array().unwrap().len(), 3);
}

#[test]
fn test_cli_interactive_blank_line_starts_new_draft() {
    let input = format!("{}\n\nFree demo?\n", fixtures::COLD_PITCH);
    let results = run_interactive(&input);

    assert_eq!(results.len(), 2, "Each draft should be reported once: {results:?}");
    assert_eq!(results[0]["reply_likelihood"], 80);
    assert_eq!(results[1]["word_count"], 2);
}

#[test]
fn test_cli_batch_mode_writes_stats() {
    let fixture = TestFixture::new();
    let draft = fixture.create_draft("pitch.txt", fixtures::COLD_PITCH);

    let output = Command::new(env!("CARGO_BIN_EXE_objection-predictor"))
        .arg("--batch-dir")
        .arg(&fixture.root_path)
        .arg("--stats-out")
        .arg(fixture.stats_path())
        .arg("--no-progress")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run objection-predictor");

    assert!(output.status.success(), "CLI failed: {}", String::from_utf8_lossy(&output.stderr));
    assert!(fixture.stats_path().exists());
    assert!(fixture.report_path(&draft).exists());
}
