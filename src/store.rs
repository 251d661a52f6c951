use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::error::StoreError;
use crate::models::MonitorState;

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the saved state. `Ok(None)` when nothing has been saved yet.
    pub fn try_load(&self) -> Result<Option<MonitorState>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let mut state: MonitorState = serde_json::from_str(&content)?;
        state.enforce_retention();
        Ok(Some(state))
    }

    /// Like [`try_load`](Self::try_load), but any failure yields an empty state.
    pub fn load(&self) -> MonitorState {
        match self.try_load() {
            Ok(Some(state)) => {
                info!(
                    path = %self.path.display(),
                    checks = state.checks.len(),
                    alerts = state.alerts.len(),
                    "Restored monitoring state"
                );
                state
            }
            Ok(None) => {
                info!(path = %self.path.display(), "No saved state, starting empty");
                MonitorState::default()
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Error loading state, starting empty");
                MonitorState::default()
            }
        }
    }

    /// Writes to a sibling temp file and renames it over the target.
    pub async fn save(&self, state: &MonitorState) -> Result<(), StoreError> {
        let content = serde_json::to_vec_pretty(state)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}
