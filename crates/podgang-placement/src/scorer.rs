//! Node scoring for placement decisions.
//!
//! A raw score is the node's allocatable memory, signed by the scoring
//! mode so that a higher raw score always means a more preferred node:
//! - **Least**: `-allocatable`, nodes with less free memory win
//! - **Most**: `+allocatable`, nodes with more free memory win
//!
//! Raw scores are only comparable within one batch. Run them through
//! [`normalize_scores`](crate::normalize_scores) before combining them with
//! anything else.

use podgang_core::{Candidate, NodeScore, ScoringMode};

use crate::error::{ScoreError, ScoreResult};

/// Raw score for one candidate under `mode`.
pub fn score_candidate(candidate: &Candidate, mode: ScoringMode) -> ScoreResult<i64> {
    let allocatable =
        i64::try_from(candidate.allocatable).map_err(|_| ScoreError::ResourceOverflow {
            node: candidate.name.clone(),
            allocatable: candidate.allocatable,
        })?;

    Ok(match mode {
        ScoringMode::Least => -allocatable,
        ScoringMode::Most => allocatable,
    })
}

/// Sort scores best first. Ties keep name order so the ranking is
/// deterministic.
pub fn sort_best_first(scores: &mut [NodeScore]) {
    scores.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
}
