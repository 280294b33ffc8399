//! Scheduler error types.

use thiserror::Error;

use podgang_core::ConfigError;
use podgang_placement::NormalizeError;

/// Errors that can occur while building or driving the plugin.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("normalization error: {0}")]
    Normalize(#[from] NormalizeError),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
