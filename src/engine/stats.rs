use hdrhistogram::Histogram;

use crate::domain::Report;

// ─── Latency Statistics ───────────────────────────────────────────────────────

/// Histogram ceiling: one minute, recorded in microseconds.
const MAX_LATENCY_US: u64 = 60_000_000;

/// Latency spread across a report's executions, in milliseconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatencySummary {
    pub count: u64,
    pub min_ms: f64,
    pub avg_ms: f64,
    pub max_ms: f64,
    pub p95_ms: f64,
}

/// Summarize response times across every execution that produced a response.
pub fn latency_summary(report: &Report) -> Result<LatencySummary, String> {
    let mut histogram = Histogram::<u64>::new_with_bounds(1, MAX_LATENCY_US, 3)
        .map_err(|err| format!("Failed to initialize latency histogram: {err}"))?;

    let mut summary = LatencySummary::default();
    let mut total_ms = 0.0;

    for execution in &report.run.executions {
        let Some(response) = execution.response.as_ref() else {
            continue;
        };
        let elapsed_ms = response.response_time;

        if summary.count == 0 {
            summary.min_ms = elapsed_ms;
            summary.max_ms = elapsed_ms;
        } else {
            summary.min_ms = summary.min_ms.min(elapsed_ms);
            summary.max_ms = summary.max_ms.max(elapsed_ms);
        }
        summary.count += 1;
        total_ms += elapsed_ms;

        let elapsed_us = ((elapsed_ms * 1000.0).round().max(1.0) as u64).min(MAX_LATENCY_US);
        let _ = histogram.record(elapsed_us);
    }

    if summary.count > 0 {
        summary.avg_ms = round_to_3(total_ms / summary.count as f64);
        summary.min_ms = round_to_3(summary.min_ms);
        summary.max_ms = round_to_3(summary.max_ms);
        summary.p95_ms = round_to_3(histogram.value_at_quantile(0.95) as f64 / 1000.0);
    }

    Ok(summary)
}

fn round_to_3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
