use std::time::Instant;

use tracing::{error, info, warn};

use crate::config::HarnessConfig;
use crate::domain::{Check, Report, Scenario, ScenarioOutcome, SuiteSummary, SCENARIOS};
use crate::engine::checks::{
    check_body_fields, check_content_type, check_pagination, check_required_field,
    check_response_times, check_status_codes, ValidationError,
};
use crate::engine::runner::run_collection;
use crate::engine::stats;

/// Body field whose presence the parameterized scenario requires.
const REQUIRED_BODY_FIELD: &str = "id";

/// Run one scenario end to end: invoke the runner, gate on its exit code,
/// then apply the scenario's validation procedure to the parsed report.
///
/// The exit-code gate comes first; a nonzero code fails the scenario without
/// inspecting the report body.
pub fn run_scenario(config: &HarnessConfig, scenario: &Scenario) -> Result<(), String> {
    let outcome = run_collection(config, scenario);
    if outcome.exit_code != 0 {
        return Err(format!(
            "{} failed with exit code {}",
            scenario.name, outcome.exit_code
        ));
    }

    let report = outcome
        .report
        .ok_or_else(|| format!("{} produced no report", scenario.name))?;

    if scenario.check == Check::ResponseTimes {
        match stats::latency_summary(&report) {
            Ok(summary) => info!(
                scenario = scenario.name,
                count = summary.count,
                min_ms = summary.min_ms,
                avg_ms = summary.avg_ms,
                max_ms = summary.max_ms,
                p95_ms = summary.p95_ms,
                "latency summary"
            ),
            Err(message) => warn!(scenario = scenario.name, "{message}"),
        }
    }

    apply_check(&report, scenario.check, config).map_err(|err| err.to_string())
}

fn apply_check(
    report: &Report,
    check: Check,
    config: &HarnessConfig,
) -> Result<(), ValidationError> {
    match check {
        Check::StatusCodes | Check::NegativeStatusCodes => check_status_codes(report),
        Check::ResponseTimes => check_response_times(report, config.time_budget_ms),
        Check::ContentType => check_content_type(report),
        Check::BodyFields => check_body_fields(report),
        Check::RequiredField => check_required_field(report, REQUIRED_BODY_FIELD),
        Check::Pagination => check_pagination(report),
    }
}

/// Run every scenario in order, one at a time, aggregating outcomes. An
/// empty `filter` selects the whole suite.
pub fn run_suite(config: &HarnessConfig, filter: &[String]) -> SuiteSummary {
    let started = Instant::now();
    let mut summary = SuiteSummary::default();

    for scenario in &SCENARIOS {
        if !filter.is_empty() && !filter.iter().any(|name| name == scenario.name) {
            continue;
        }

        info!(scenario = scenario.name, data_file = scenario.data_file, "running scenario");
        let scenario_started = Instant::now();
        let result = run_scenario(config, scenario);
        let duration_ms = scenario_started.elapsed().as_millis() as u64;

        match &result {
            Ok(()) => info!(scenario = scenario.name, duration_ms, "scenario passed"),
            Err(failure) => error!(scenario = scenario.name, duration_ms, "{failure}"),
        }

        summary.record(ScenarioOutcome {
            scenario: scenario.name.to_string(),
            passed: result.is_ok(),
            failure: result.err(),
            duration_ms,
        });
    }

    summary.duration_ms = started.elapsed().as_millis() as u64;
    summary
}
