//! podgang-placement — node scoring for gang-admitted jobs.
//!
//! This crate ranks candidate nodes for a single job. It does NOT decide
//! whether the job may be placed at all (that's `podgang-scheduler`).
//!
//! # Components
//!
//! - **`scorer`** — Raw scores from allocatable memory and the scoring mode
//! - **`normalize`** — Min-max rescaling of a batch onto `0..=100`

pub mod error;
pub mod normalize;
pub mod scorer;

pub use error::{NormalizeError, NormalizeResult, ScoreError, ScoreResult};
pub use normalize::{midpoint, normalize_scores};
pub use scorer::{score_candidate, sort_best_first};
