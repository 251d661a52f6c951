use anyhow::{Result, Context};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

mod alerts;
mod api;
mod classify;
mod config;
mod engine;
mod error;
mod models;
mod probe;
mod stats;
mod store;
mod utils;

#[cfg(test)]
mod test_support;

use crate::config::MonitorConfig;
use crate::engine::Monitor;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON file listing the targets; built-in targets are used if it is absent.
    #[arg(short, long, env = "MONITOR_CONFIG", default_value = "config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::INFO.into()))
        .with_ansi(true)
        .init();

    let args = Args::parse();
    let config = MonitorConfig::load(&args.config)
        .with_context(|| format!("Invalid configuration in {}", args.config.display()))?;

    info!("Starting uptime monitor with {} targets", config.targets.len());
    let monitor = Arc::new(Monitor::new(config)?);

    let monitor_for_api = Arc::clone(&monitor);
    let api_port = monitor.config.api_port;
    tokio::spawn(async move {
        if let Err(e) = api::start_server(api_port, monitor_for_api).await {
            tracing::error!("API server stopped: {:#}", e);
        }
    });

    tokio::spawn(Arc::clone(&monitor).run());

    signal::ctrl_c().await?;
    info!("Shutdown signal received. Stopping uptime monitor...");

    Ok(())
}
