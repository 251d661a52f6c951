use serde::{Deserialize, Deserializer, Serialize};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

/// Retained check results across all targets.
pub const MAX_CHECKS: usize = 1000;
/// Retained alerts across all targets.
pub const MAX_ALERTS: usize = 100;
/// Trailing slice of the global history used for the latency average.
pub const LATENCY_WINDOW: usize = 20;
pub const SNAPSHOT_CHECKS: usize = 50;
pub const SNAPSHOT_ALERTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Up,
    Warning,
    Down,
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HealthState::Up => "up",
            HealthState::Warning => "warning",
            HealthState::Down => "down",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub url: String,
    pub status: HealthState,
    #[serde(rename = "response_time")]
    pub latency_ms: f64,
    pub status_code: u16,
    pub error: Option<String>,
}

impl CheckResult {
    pub fn is_up(&self) -> bool {
        self.status == HealthState::Up
    }
}

/// Rolling statistics for one target.
///
/// `down_count` covers both `warning` and `down` results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSummary {
    pub total_checks: u64,
    pub up_count: u64,
    pub down_count: u64,
    #[serde(rename = "avg_response_time")]
    pub avg_latency_ms: f64,
    pub last_check: Option<CheckResult>,
    pub uptime_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "service")]
    pub target: String,
    pub message: String,
    pub severity: Severity,
}

/// Accepts RFC 3339 and offset-less ISO 8601 timestamps, the latter read as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
}

/// Everything the engine mutates, in the layout written to disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorState {
    #[serde(default)]
    pub checks: VecDeque<CheckResult>,
    #[serde(default)]
    pub summary: BTreeMap<String, TargetSummary>,
    #[serde(default)]
    pub alerts: VecDeque<Alert>,
}

impl MonitorState {
    /// Drops the oldest entries of both logs beyond their caps.
    pub fn enforce_retention(&mut self) {
        truncate_front(&mut self.checks, MAX_CHECKS);
        truncate_front(&mut self.alerts, MAX_ALERTS);
    }
}

/// Appends `item` and evicts from the front until `log` holds at most `cap` entries.
pub fn push_bounded<T>(log: &mut VecDeque<T>, item: T, cap: usize) {
    log.push_back(item);
    truncate_front(log, cap);
}

fn truncate_front<T>(log: &mut VecDeque<T>, cap: usize) {
    if log.len() > cap {
        let excess = log.len() - cap;
        log.drain(..excess);
    }
}

/// Clones the newest `n` entries, oldest first.
pub fn tail<T: Clone>(log: &VecDeque<T>, n: usize) -> Vec<T> {
    log.iter().skip(log.len().saturating_sub(n)).cloned().collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub summaries: BTreeMap<String, TargetSummary>,
    pub recent_checks: Vec<CheckResult>,
    pub recent_alerts: Vec<Alert>,
    pub as_of: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineHealth {
    pub status: String,
    pub as_of: DateTime<Utc>,
    pub target_count: usize,
    pub total_checks_recorded: usize,
}
