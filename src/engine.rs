use anyhow::{Context, Result};
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::alerts::record_alert;
use crate::config::MonitorConfig;
use crate::models::{
    tail, CheckResult, EngineHealth, HealthState, MonitorState, Snapshot, SNAPSHOT_ALERTS, SNAPSHOT_CHECKS,
};
use crate::probe::Prober;
use crate::stats::record_check;
use crate::store::JsonFileStore;

/// Owns all monitoring state. Cycles are the only writer; readers get copies.
pub struct Monitor {
    pub config: MonitorConfig,
    prober: Prober,
    state: RwLock<MonitorState>,
    store: JsonFileStore,
    cycle_guard: Mutex<()>,
}

impl Monitor {
    /// Builds the monitor and restores any state saved by a previous run.
    pub fn new(config: MonitorConfig) -> Result<Self> {
        let prober = Prober::new().context("Failed to create HTTP client")?;
        let store = JsonFileStore::new(config.data_file.clone());
        let state = store.load();

        Ok(Self {
            config,
            prober,
            state: RwLock::new(state),
            store,
            cycle_guard: Mutex::new(()),
        })
    }

    /// Runs one cycle immediately, then one per `check_interval`. Never returns.
    pub async fn run(self: Arc<Self>) {
        info!(
            targets = self.config.targets.len(),
            interval_secs = self.config.check_interval,
            "Uptime monitor active"
        );

        let mut ticker = tokio::time::interval(self.config.check_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            self.run_cycle().await;
        }
    }

    /// Probes every target once, records the results and saves the state.
    ///
    /// Skipped with a warning if another cycle is still in progress.
    pub async fn run_cycle(&self) {
        let Ok(_cycle) = self.cycle_guard.try_lock() else {
            warn!("Previous monitoring cycle still running, skipping");
            return;
        };
        let start_time = Instant::now();

        let results = join_all(self.config.targets.iter().map(|t| self.prober.probe(t))).await;
        let total = results.len();
        let failing = results.iter().filter(|r| !r.is_up()).count();
        self.record(results).await;
        self.persist().await;

        info!(
            checks = total,
            failing,
            "Monitoring cycle completed in {:.2}s",
            start_time.elapsed().as_secs_f64()
        );
    }

    /// Applies results in order under one write lock.
    pub async fn record(&self, results: Vec<CheckResult>) {
        let mut state = self.state.write().await;
        for result in results {
            log_result(&result);
            record_alert(&mut state, &result);
            record_check(&mut state, result);
        }
    }

    async fn persist(&self) {
        let state = self.state.read().await.clone();
        if let Err(e) = self.store.save(&state).await {
            error!(path = %self.store.path().display(), error = %e, "Error saving monitoring state");
        }
    }

    pub async fn snapshot(&self) -> Snapshot {
        let state = self.state.read().await;
        Snapshot {
            summaries: state.summary.clone(),
            recent_checks: tail(&state.checks, SNAPSHOT_CHECKS),
            recent_alerts: tail(&state.alerts, SNAPSHOT_ALERTS),
            as_of: Utc::now(),
        }
    }

    pub async fn engine_health(&self) -> EngineHealth {
        let state = self.state.read().await;
        EngineHealth {
            status: "healthy".into(),
            as_of: Utc::now(),
            target_count: self.config.targets.len(),
            total_checks_recorded: state.checks.len(),
        }
    }
}

fn log_result(result: &CheckResult) {
    let error = result.error.as_deref().unwrap_or("");
    match result.status {
        HealthState::Up => {}
        HealthState::Warning => warn!(service = %result.name, status_code = result.status_code, error, "Service degraded"),
        HealthState::Down => error!(service = %result.name, latency_ms = result.latency_ms, error, "Service down"),
    }
}
