use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::HarnessConfig;
use crate::domain::{Report, Scenario};

// ─── Runner Invocation ────────────────────────────────────────────────────────

/// Why an invocation produced no usable report. Callers normally never see
/// these: [`run_collection`] collapses every kind into the uniform
/// no-report/failure-code outcome.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("runner executable not found at `{path}`")]
    ExecutableNotFound { path: String },
    #[error("failed to invoke runner: {0}")]
    Invocation(#[from] std::io::Error),
    #[error("failed to read report `{path}`: {source}")]
    ReportRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed report `{path}`: {source}")]
    ReportParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Result of one runner invocation. Invocation and parse failures are
/// normalized to `report: None` with a failure exit code rather than
/// propagated, so every caller can apply the same zero-exit-code gate.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: Option<Report>,
    pub exit_code: i32,
}

/// Run one collection/data-file pairing through the external runner and
/// parse the JSON report it exports.
///
/// The subprocess call blocks until the runner exits; no timeout is imposed.
/// Its stdout/stderr are captured for diagnostic logging only.
pub fn run_collection(config: &HarnessConfig, scenario: &Scenario) -> RunOutcome {
    match try_run(config, scenario) {
        Ok((report, exit_code)) => RunOutcome {
            report: Some(report),
            exit_code,
        },
        Err(err) => {
            error!(scenario = scenario.name, "runner invocation failed: {err}");
            RunOutcome {
                report: None,
                exit_code: 1,
            }
        }
    }
}

fn try_run(config: &HarnessConfig, scenario: &Scenario) -> Result<(Report, i32), RunnerError> {
    let collection = config.collections_dir.join(scenario.collection);
    let data_file = config.data_dir.join(scenario.data_file);
    let report_path = config.reports_dir.join(scenario.report_file());

    fs::create_dir_all(&config.reports_dir)?;

    let output = Command::new(&config.runner_path)
        .arg("run")
        .arg(&collection)
        .arg("--iteration-data")
        .arg(&data_file)
        .arg("--reporters")
        .arg("json")
        .arg("--reporter-json-export")
        .arg(&report_path)
        .output()
        .map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => RunnerError::ExecutableNotFound {
                path: config.runner_path.display().to_string(),
            },
            _ => RunnerError::Invocation(err),
        })?;

    // Killed by signal counts as failure.
    let exit_code = output.status.code().unwrap_or(1);

    info!(scenario = scenario.name, exit_code, "runner finished");
    debug!(
        scenario = scenario.name,
        "runner stdout:\n{}",
        String::from_utf8_lossy(&output.stdout)
    );
    if !output.stderr.is_empty() {
        debug!(
            scenario = scenario.name,
            "runner stderr:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let report = load_report(&report_path)?;
    Ok((report, exit_code))
}

/// Read and parse the JSON report the runner exported.
pub fn load_report(path: &Path) -> Result<Report, RunnerError> {
    let raw = fs::read_to_string(path).map_err(|source| RunnerError::ReportRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| RunnerError::ReportParse {
        path: path.to_path_buf(),
        source,
    })
}
