//! Metrics collector — counts plugin events.
//!
//! Counters are plain atomics; the plugin calls into the collector from
//! whatever thread runs the cycle.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::debug;

use podgang_core::{Job, NodeScore};
use podgang_placement::{NormalizeError, ScoreError};
use podgang_scheduler::{Admission, RejectReason, SchedulingObserver};

/// Point-in-time copy of every counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub admitted: u64,
    pub rejected_insufficient_membership: u64,
    pub rejected_invalid_quorum: u64,
    pub rejected_membership_unavailable: u64,
    pub nodes_scored: u64,
    pub score_overflows: u64,
    pub score_lookup_failures: u64,
    pub batches_normalized: u64,
    pub normalize_failures: u64,
}

impl MetricsSnapshot {
    pub fn rejected(&self) -> u64 {
        self.rejected_insufficient_membership
            + self.rejected_invalid_quorum
            + self.rejected_membership_unavailable
    }
}

/// Observer that counts admissions, scores, and normalizations.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    admitted: AtomicU64,
    rejected_insufficient_membership: AtomicU64,
    rejected_invalid_quorum: AtomicU64,
    rejected_membership_unavailable: AtomicU64,
    nodes_scored: AtomicU64,
    score_overflows: AtomicU64,
    score_lookup_failures: AtomicU64,
    batches_normalized: AtomicU64,
    normalize_failures: AtomicU64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            admitted: self.admitted.load(Ordering::Relaxed),
            rejected_insufficient_membership: self
                .rejected_insufficient_membership
                .load(Ordering::Relaxed),
            rejected_invalid_quorum: self.rejected_invalid_quorum.load(Ordering::Relaxed),
            rejected_membership_unavailable: self
                .rejected_membership_unavailable
                .load(Ordering::Relaxed),
            nodes_scored: self.nodes_scored.load(Ordering::Relaxed),
            score_overflows: self.score_overflows.load(Ordering::Relaxed),
            score_lookup_failures: self.score_lookup_failures.load(Ordering::Relaxed),
            batches_normalized: self.batches_normalized.load(Ordering::Relaxed),
            normalize_failures: self.normalize_failures.load(Ordering::Relaxed),
        }
    }
}

impl SchedulingObserver for MetricsCollector {
    fn admission_decided(&self, _job: &Job, admission: &Admission) {
        let counter = match admission {
            Admission::Admit => &self.admitted,
            Admission::Reject(RejectReason::InsufficientMembership { .. }) => {
                &self.rejected_insufficient_membership
            }
            Admission::Reject(RejectReason::InvalidQuorum { .. }) => &self.rejected_invalid_quorum,
            Admission::Reject(RejectReason::MembershipUnavailable { .. }) => {
                &self.rejected_membership_unavailable
            }
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn node_scored(&self, _job: &Job, _node: &str, _score: i64) {
        self.nodes_scored.fetch_add(1, Ordering::Relaxed);
    }

    fn node_score_failed(&self, _job: &Job, node: &str, error: &ScoreError) {
        match error {
            ScoreError::ResourceOverflow { .. } => {
                self.score_overflows.fetch_add(1, Ordering::Relaxed);
            }
            ScoreError::Lookup(_) => {
                self.score_lookup_failures.fetch_add(1, Ordering::Relaxed);
            }
        }
        debug!(%node, "score failure counted");
    }

    fn batch_normalized(&self, _job: &Job, _scores: &[NodeScore]) {
        self.batches_normalized.fetch_add(1, Ordering::Relaxed);
    }

    fn normalize_failed(&self, _job: &Job, _error: &NormalizeError) {
        self.normalize_failures.fetch_add(1, Ordering::Relaxed);
    }
}
