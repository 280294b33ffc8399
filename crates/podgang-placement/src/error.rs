//! Scoring and normalization error types.

use thiserror::Error;

use podgang_core::LookupError;

pub type ScoreResult<T> = Result<T, ScoreError>;

pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// A single candidate could not be scored.
///
/// These never abort a scheduling round; the candidate is dropped and the
/// rest of the batch carries on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("allocatable resource on node {node} overflows a signed score: {allocatable}")]
    ResourceOverflow { node: String, allocatable: u64 },

    #[error("resource lookup failed: {0}")]
    Lookup(#[from] LookupError),
}

/// The batch handed to the normalizer was unusable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("cannot normalize an empty score batch")]
    EmptyBatch,
}
