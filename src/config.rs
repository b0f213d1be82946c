use std::env;
use std::path::PathBuf;

/// Environment variable naming the runner executable, for hosts where it is
/// not on `PATH`.
pub const RUNNER_ENV_VAR: &str = "NEWMAN_PATH";

/// Response-time budget applied by the response-time scenario, in
/// milliseconds.
pub const DEFAULT_TIME_BUDGET_MS: f64 = 500.0;

/// Resolved harness configuration.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub runner_path: PathBuf,
    pub collections_dir: PathBuf,
    pub data_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub time_budget_ms: f64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            runner_path: PathBuf::from("newman"),
            collections_dir: PathBuf::from("collections"),
            data_dir: PathBuf::from("data"),
            reports_dir: PathBuf::from("reports"),
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
        }
    }
}

impl HarnessConfig {
    /// Defaults with the runner path taken from `NEWMAN_PATH` when set.
    pub fn from_env() -> Self {
        Self {
            runner_path: resolve_runner_path(None, env::var(RUNNER_ENV_VAR).ok()),
            ..Self::default()
        }
    }
}

/// Pick the runner executable.
/// Priority: explicit override > environment > `newman` on `PATH`.
pub fn resolve_runner_path(explicit: Option<PathBuf>, env_value: Option<String>) -> PathBuf {
    // 1. Explicit override (highest priority)
    if let Some(path) = explicit {
        return path;
    }

    // 2. Environment
    if let Some(value) = env_value {
        if !value.trim().is_empty() {
            return PathBuf::from(value);
        }
    }

    // 3. Default: rely on PATH lookup
    PathBuf::from("newman")
}
