use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MonitorConfig {
    #[serde(default = "default_targets")]
    pub targets: Vec<Target>,
    #[serde(default = "default_check_interval")]
    pub check_interval: u64,
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_check_interval() -> u64 { 30 }
fn default_api_port() -> u16 { 5000 }
fn default_data_file() -> PathBuf { PathBuf::from("/app/data/monitoring.json") }
fn default_static_dir() -> PathBuf { PathBuf::from("public") }

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Target {
    pub name: String,
    pub url: String,
    #[serde(default = "default_expected_status")]
    pub expected_status: u16,
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

pub fn default_expected_status() -> u16 { 200 }
pub fn default_timeout() -> u64 { 5000 }

impl Target {
    pub fn new(name: &str, url: &str, timeout_ms: u64) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            expected_status: default_expected_status(),
            timeout_ms,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Services watched when no configuration file is present.
fn default_targets() -> Vec<Target> {
    vec![
        Target::new("WordPress Site", "https://nginx:443", 10_000),
        Target::new("Adminer", "http://adminer:8080", 5_000),
        Target::new("Static Website", "http://static_website:9999", 5_000),
    ]
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            targets: default_targets(),
            check_interval: default_check_interval(),
            api_port: default_api_port(),
            data_file: default_data_file(),
            static_dir: default_static_dir(),
        }
    }
}

impl MonitorConfig {
    /// Reads the config from `path`, falling back to the built-in defaults when the
    /// file does not exist. The result is validated either way.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        if self.check_interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        let mut seen = HashSet::new();
        for target in &self.targets {
            if target.name.trim().is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if !seen.insert(target.name.as_str()) {
                return Err(ConfigError::DuplicateName(target.name.clone()));
            }
            if target.url.trim().is_empty() {
                return Err(ConfigError::MissingUrl(target.name.clone()));
            }
            let url = reqwest::Url::parse(&target.url).map_err(|e| ConfigError::InvalidUrl {
                target: target.name.clone(),
                reason: e.to_string(),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidUrl {
                    target: target.name.clone(),
                    reason: format!("unsupported scheme '{}'", url.scheme()),
                });
            }
            if target.timeout_ms == 0 {
                return Err(ConfigError::ZeroTimeout(target.name.clone()));
            }
        }
        Ok(())
    }
}
