use crate::models::{push_bounded, Alert, CheckResult, HealthState, MonitorState, Severity, MAX_ALERTS};

/// Builds the alert for a non-`up` result.
pub fn alert_for(result: &CheckResult) -> Option<Alert> {
    if result.is_up() {
        return None;
    }
    let severity = if result.status == HealthState::Down { Severity::Critical } else { Severity::Warning };
    Some(Alert {
        timestamp: result.timestamp,
        target: result.name.clone(),
        message: format!(
            "Service {} is {}: {}",
            result.name,
            result.status,
            result.error.as_deref().unwrap_or("Unknown error")
        ),
        severity,
    })
}

/// Appends the alert for `result`, if any, keeping the newest `MAX_ALERTS`.
pub fn record_alert(state: &mut MonitorState, result: &CheckResult) -> Option<Alert> {
    let alert = alert_for(result)?;
    push_bounded(&mut state.alerts, alert.clone(), MAX_ALERTS);
    Some(alert)
}
