//! Min-max normalization of a score batch.
//!
//! Maps every raw score in a batch onto `MIN_NODE_SCORE..=MAX_NODE_SCORE`:
//!
//! ```text
//! normalized = MIN + (raw - batch_min) * (MAX - MIN) / (batch_max - batch_min)
//! ```
//!
//! Division truncates toward zero, so a raw score two thirds of the way
//! up the batch lands on 66, not 67. The batch minimum always maps to
//! exactly `MIN_NODE_SCORE` and the batch maximum to `MAX_NODE_SCORE`.
//!
//! A batch whose scores are all equal carries no signal; every entry gets
//! the midpoint of the output range instead of dividing by zero.

use podgang_core::{MAX_NODE_SCORE, MIN_NODE_SCORE, NodeScore};

use crate::error::{NormalizeError, NormalizeResult};

/// Midpoint of the output range, rounded toward the lower bound.
pub fn midpoint() -> i64 {
    (MIN_NODE_SCORE + MAX_NODE_SCORE).div_euclid(2)
}

/// Smallest and largest score in the batch, found in one pass.
fn bounds(scores: &[NodeScore]) -> Option<(i64, i64)> {
    scores.iter().fold(None, |acc, s| match acc {
        None => Some((s.score, s.score)),
        Some((lo, hi)) => Some((lo.min(s.score), hi.max(s.score))),
    })
}

/// Rescale one raw score given the batch bounds. Requires `min < max`.
///
/// Intermediates are widened to `i128` so raw scores anywhere in the
/// `i64` range cannot overflow the multiplication.
fn rescale(raw: i64, min: i64, max: i64) -> i64 {
    let offset = i128::from(raw) - i128::from(min);
    let span = i128::from(max) - i128::from(min);
    let out_span = i128::from(MAX_NODE_SCORE - MIN_NODE_SCORE);
    // offset <= span, so the quotient lies within 0..=out_span.
    MIN_NODE_SCORE + (offset * out_span / span) as i64
}

/// Rewrite every raw score in `scores` with its normalized value.
///
/// The batch must hold one job's scoring round. Mixing rounds cannot be
/// detected here and produces meaningless results.
pub fn normalize_scores(scores: &mut [NodeScore]) -> NormalizeResult<()> {
    let (min, max) = bounds(scores).ok_or(NormalizeError::EmptyBatch)?;

    if min == max {
        let mid = midpoint();
        for s in scores.iter_mut() {
            s.score = mid;
        }
        return Ok(());
    }

    for s in scores.iter_mut() {
        s.score = rescale(s.score, min, max);
    }
    Ok(())
}
