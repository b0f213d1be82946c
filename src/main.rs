//! `vetman` entry point.
//!
//! Runs the collection-runner scenario suite sequentially and exits nonzero
//! if any scenario failed. Diagnostics (runner output, per-scenario results)
//! go to the log; the final summary goes to stdout as text or JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use vetman::config::{resolve_runner_path, HarnessConfig, RUNNER_ENV_VAR};
use vetman::domain::SuiteSummary;
use vetman::suite;

#[derive(Debug, Parser)]
#[command(
    name = "vetman",
    about = "Validate collection-runner reports against expected outcomes"
)]
struct Cli {
    /// Path to the collection-runner executable (overrides NEWMAN_PATH).
    #[arg(long)]
    runner: Option<PathBuf>,

    /// Directory holding collection definitions.
    #[arg(long, default_value = "collections")]
    collections: PathBuf,

    /// Directory holding iteration-data CSV files.
    #[arg(long, default_value = "data")]
    data: PathBuf,

    /// Directory the runner exports JSON reports into.
    #[arg(long, default_value = "reports")]
    reports: PathBuf,

    /// Response-time budget in milliseconds.
    #[arg(long, default_value_t = 500.0)]
    time_budget: f64,

    /// Run only the named scenario; repeatable. Default: the full suite.
    #[arg(long = "scenario")]
    scenarios: Vec<String>,

    /// Summary output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Output format for the suite summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("vetman: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let config = HarnessConfig {
        runner_path: resolve_runner_path(cli.runner, std::env::var(RUNNER_ENV_VAR).ok()),
        collections_dir: cli.collections,
        data_dir: cli.data,
        reports_dir: cli.reports,
        time_budget_ms: cli.time_budget,
    };

    let summary = suite::run_suite(&config, &cli.scenarios);

    match cli.format {
        OutputFormat::Text => print_text(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(summary.all_passed())
}

fn print_text(summary: &SuiteSummary) {
    for outcome in &summary.outcomes {
        match &outcome.failure {
            None => println!(
                "{:<24} passed  ({} ms)",
                outcome.scenario, outcome.duration_ms
            ),
            Some(failure) => println!("{:<24} FAILED  {failure}", outcome.scenario),
        }
    }
    println!(
        "{} scenarios: {} passed, {} failed ({} ms)",
        summary.total, summary.passed, summary.failed, summary.duration_ms
    );
}
