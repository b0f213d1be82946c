use serde::Serialize;

// ─── Suite Summary Types ──────────────────────────────────────────────────────

/// Outcome of one scenario: either it passed, or the first failure message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub scenario: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    pub duration_ms: u64,
}

/// Aggregated report for a full suite run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteSummary {
    pub fn record(&mut self, outcome: ScenarioOutcome) {
        self.total += 1;
        if outcome.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push(outcome);
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
