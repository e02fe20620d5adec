use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use objection_predictor::objection_analyzer::is_blank;
use objection_predictor::{
    process_drafts_parallel, AnalysisResult, AnalysisScheduler, BatchConfig,
    ObjectionAnalyzer, TextReport,
};

#[derive(Parser, Debug)]
#[command(name = "objection-predictor")]
#[command(about = "Predict psychological objections to a cold outreach draft before you hit send")]
#[command(version)]
struct Args {
    /// Draft file to analyze (stdin when omitted or "-")
    draft: Option<PathBuf>,

    /// Analyze this text instead of reading a file
    #[arg(long, conflicts_with_all = ["draft", "batch_dir", "interactive"])]
    text: Option<String>,

    /// Print the analysis as JSON
    #[arg(long)]
    json: bool,

    /// Show every detected objection instead of the top four
    #[arg(long)]
    all: bool,

    /// Re-analyze the stdin draft as each line arrives; a blank line ends a draft
    #[arg(long, conflicts_with_all = ["draft", "batch_dir"])]
    interactive: bool,

    /// Delay before an interactive analysis settles, in milliseconds
    #[arg(long, default_value_t = 800)]
    delay_ms: u64,

    /// Analyze every *.txt draft under this directory
    #[arg(long, conflicts_with = "draft")]
    batch_dir: Option<PathBuf>,

    /// Re-analyze drafts that already have a report
    #[arg(long)]
    overwrite_all: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Maximum drafts analyzed concurrently (defaults to CPU count)
    #[arg(long)]
    max_concurrent: Option<usize>,

    /// Stats output file path
    #[arg(long, default_value = "run_stats.json")]
    stats_out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    let analyzer = ObjectionAnalyzer::with_default_patterns();

    if let Some(root_dir) = args.batch_dir.clone() {
        return run_batch(root_dir, analyzer, &args).await;
    }
    if args.interactive {
        return run_interactive(analyzer, &args).await;
    }

    let text = match (&args.text, &args.draft) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) if path.as_os_str() != "-" => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read draft {}", path.display()))?,
        _ => read_stdin()?,
    };

    let analysis = if args.all {
        analyzer.analyze_all(&text)
    } else {
        analyzer.analyze(&text)
    };

    match analysis {
        Some(result) => print_result(&result, args.json)?,
        None => eprintln!("Draft is empty; nothing to analyze."),
    }
    Ok(())
}

async fn run_batch(root_dir: PathBuf, analyzer: ObjectionAnalyzer, args: &Args) -> Result<()> {
    if !root_dir.exists() {
        anyhow::bail!("Root directory does not exist: {}", root_dir.display());
    }
    if !root_dir.is_dir() {
        anyhow::bail!("Root path is not a directory: {}", root_dir.display());
    }

    let mut config = BatchConfig {
        overwrite_all: args.overwrite_all,
        fail_fast: args.fail_fast,
        show_progress: !args.no_progress,
        include_all: args.all,
        ..Default::default()
    };
    if let Some(max_concurrent) = args.max_concurrent {
        config.max_concurrent = max_concurrent.max(1);
    }

    info!("Starting batch analysis in: {}", root_dir.display());
    let stats = process_drafts_parallel(&root_dir, analyzer, &config).await?;
    stats.write_to(&args.stats_out).await?;

    println!("objection-predictor v{} - batch analysis complete", env!("CARGO_PKG_VERSION"));
    println!("  Analyzed: {} drafts", stats.drafts_processed);
    println!("  Skipped (report exists): {}", stats.drafts_skipped);
    println!("  Empty: {}", stats.drafts_empty);
    if stats.drafts_failed > 0 {
        println!("  Failed: {}", stats.drafts_failed);
    }
    if let Some(average) = stats.average_reply_likelihood {
        println!("  Average reply likelihood: {average:.1}%");
    }
    println!("  Stats written to {}", args.stats_out.display());
    Ok(())
}

async fn run_interactive(analyzer: ObjectionAnalyzer, args: &Args) -> Result<()> {
    let scheduler = AnalysisScheduler::with_delay(analyzer, Duration::from_millis(args.delay_ms));
    let mut state_rx = scheduler.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut draft = String::new();
    let mut last_printed = 0u64;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read stdin")? {
                    Some(line) if is_blank(&line) => {
                        // Draft boundary: settle the finished draft before starting the next
                        flush_pending(&scheduler, &mut last_printed, args.json).await?;
                        draft.clear();
                    }
                    Some(line) => {
                        if !draft.is_empty() {
                            draft.push('\n');
                        }
                        draft.push_str(&line);
                        if scheduler.submit(draft.clone()).is_some() && !args.json {
                            eprintln!("Analyzing...");
                        }
                    }
                    None => break,
                }
            }
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                if !state.analyzing && state.generation != last_printed {
                    if let Some(result) = state.result {
                        print_result(&result, args.json)?;
                    }
                    last_printed = state.generation;
                }
            }
        }
    }

    flush_pending(&scheduler, &mut last_printed, args.json).await
}

/// Wait for the pending analysis and print it unless already shown
async fn flush_pending(scheduler: &AnalysisScheduler, last_printed: &mut u64, json: bool) -> Result<()> {
    if scheduler.is_analyzing() {
        scheduler.wait_for_result().await;
    }
    let state = scheduler.current();
    if state.generation != *last_printed {
        if let Some(result) = state.result {
            print_result(&result, json)?;
        }
        *last_printed = state.generation;
    }
    Ok(())
}

fn print_result(result: &AnalysisResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", TextReport(result));
    }
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text).context("Failed to read draft from stdin")?;
    Ok(text)
}
