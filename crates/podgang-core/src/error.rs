//! Error types shared across podgang crates.

use thiserror::Error;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for collaborator lookups.
pub type LookupResult<T> = Result<T, LookupError>;

/// Errors raised while building the plugin configuration.
///
/// All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid mode, got {0}")]
    InvalidMode(String),

    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse plugin args: {0}")]
    Args(#[from] serde_json::Error),

    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Why a job's `minAvailable` label could not be used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuorumError {
    #[error("quorum label is missing")]
    Missing,

    #[error("quorum is not a non-negative integer: {0:?}")]
    Malformed(String),
}

/// Errors returned by cluster-state collaborators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("cluster state unavailable: {0}")]
    Unavailable(String),
}
