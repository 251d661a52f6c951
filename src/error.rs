use thiserror::Error;

/// Startup-time configuration problems. These abort the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no monitoring targets configured")]
    NoTargets,

    #[error("check_interval must be greater than zero")]
    ZeroInterval,

    #[error("target name must not be empty")]
    EmptyName,

    #[error("duplicate target name: {0}")]
    DuplicateName(String),

    #[error("target {0} has no url")]
    MissingUrl(String),

    #[error("target {target} has an invalid url: {reason}")]
    InvalidUrl { target: String, reason: String },

    #[error("target {0} has a zero timeout")]
    ZeroTimeout(String),
}

/// Failures of the on-disk state store. Logged by the engine, never fatal.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state file io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state file serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
