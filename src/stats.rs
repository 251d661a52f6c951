use crate::models::{push_bounded, CheckResult, MonitorState, TargetSummary, LATENCY_WINDOW, MAX_CHECKS};
use crate::utils::round2;

/// Appends `result` to the history and folds it into its target's summary.
///
/// The latency average looks at the newest `LATENCY_WINDOW` entries of the shared
/// history and keeps only this target's `up` results; with several targets that is
/// fewer than `LATENCY_WINDOW` samples. When none qualify the previous average stays.
pub fn record_check(state: &mut MonitorState, result: CheckResult) -> TargetSummary {
    let name = result.name.clone();
    let is_up = result.is_up();
    push_bounded(&mut state.checks, result.clone(), MAX_CHECKS);

    let summary = state.summary.entry(name.clone()).or_default();
    summary.total_checks += 1;
    if is_up {
        summary.up_count += 1;
    } else {
        summary.down_count += 1;
    }
    summary.last_check = Some(result);
    summary.uptime_percentage = uptime_percentage(summary.up_count, summary.total_checks);

    let start = state.checks.len().saturating_sub(LATENCY_WINDOW);
    let recent: Vec<f64> = state
        .checks
        .iter()
        .skip(start)
        .filter(|c| c.name == name && c.is_up())
        .map(|c| c.latency_ms)
        .collect();
    if !recent.is_empty() {
        summary.avg_latency_ms = round2(recent.iter().sum::<f64>() / recent.len() as f64);
    }

    summary.clone()
}

pub fn uptime_percentage(up_count: u64, total_checks: u64) -> f64 {
    if total_checks == 0 {
        return 0.0;
    }
    round2(up_count as f64 / total_checks as f64 * 100.0)
}
