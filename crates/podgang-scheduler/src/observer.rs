//! Observability hooks for the plugin.
//!
//! The admission and scoring algorithms never log on their own. The plugin
//! reports what happened to an injected [`SchedulingObserver`], and the
//! host decides whether that becomes log lines, metrics, or nothing.

use std::sync::Arc;

use tracing::{debug, info, warn};

use podgang_core::{Job, NodeScore};
use podgang_placement::{NormalizeError, ScoreError};

use crate::admission::Admission;

/// Receives plugin events. Every method defaults to doing nothing.
pub trait SchedulingObserver: Send + Sync {
    fn admission_decided(&self, _job: &Job, _admission: &Admission) {}

    fn node_scored(&self, _job: &Job, _node: &str, _score: i64) {}

    fn node_score_failed(&self, _job: &Job, _node: &str, _error: &ScoreError) {}

    fn batch_normalized(&self, _job: &Job, _scores: &[NodeScore]) {}

    fn normalize_failed(&self, _job: &Job, _error: &NormalizeError) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SchedulingObserver for NoopObserver {}

/// Emits every event as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SchedulingObserver for TracingObserver {
    fn admission_decided(&self, job: &Job, admission: &Admission) {
        match admission {
            Admission::Admit => {
                info!(job = %job.name, group = ?job.group(), "job admitted");
            }
            Admission::Reject(reason) if reason.is_fault() => {
                warn!(job = %job.name, group = reason.group(), %reason, "job rejected");
            }
            Admission::Reject(reason) => {
                info!(job = %job.name, group = reason.group(), %reason, "job rejected");
            }
        }
    }

    fn node_scored(&self, job: &Job, node: &str, score: i64) {
        debug!(job = %job.name, node, score, "node scored");
    }

    fn node_score_failed(&self, job: &Job, node: &str, error: &ScoreError) {
        warn!(job = %job.name, node, %error, "node excluded from scoring");
    }

    fn batch_normalized(&self, job: &Job, scores: &[NodeScore]) {
        debug!(job = %job.name, nodes = scores.len(), "scores normalized");
    }

    fn normalize_failed(&self, job: &Job, error: &NormalizeError) {
        warn!(job = %job.name, %error, "score normalization failed");
    }
}

/// Forwards every event to each inner observer in order.
#[derive(Clone, Default)]
pub struct FanoutObserver {
    observers: Vec<Arc<dyn SchedulingObserver>>,
}

impl FanoutObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: Arc<dyn SchedulingObserver>) -> Self {
        self.observers.push(observer);
        self
    }
}

impl SchedulingObserver for FanoutObserver {
    fn admission_decided(&self, job: &Job, admission: &Admission) {
        for o in &self.observers {
            o.admission_decided(job, admission);
        }
    }

    fn node_scored(&self, job: &Job, node: &str, score: i64) {
        for o in &self.observers {
            o.node_scored(job, node, score);
        }
    }

    fn node_score_failed(&self, job: &Job, node: &str, error: &ScoreError) {
        for o in &self.observers {
            o.node_score_failed(job, node, error);
        }
    }

    fn batch_normalized(&self, job: &Job, scores: &[NodeScore]) {
        for o in &self.observers {
            o.batch_normalized(job, scores);
        }
    }

    fn normalize_failed(&self, job: &Job, error: &NormalizeError) {
        for o in &self.observers {
            o.normalize_failed(job, error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl SchedulingObserver for Recorder {
        fn admission_decided(&self, job: &Job, admission: &Admission) {
            self.0
                .lock()
                .unwrap()
                .push(format!("{}:{}", job.name, admission.is_admitted()));
        }

        fn node_scored(&self, _job: &Job, node: &str, score: i64) {
            self.0.lock().unwrap().push(format!("{node}={score}"));
        }
    }

    #[test]
    fn fanout_reaches_every_observer() {
        let a = Arc::new(Recorder::default());
        let b = Arc::new(Recorder::default());
        let fanout = FanoutObserver::new()
            .with(a.clone())
            .with(Arc::new(NoopObserver))
            .with(b.clone());

        let job = Job::new("p1");
        fanout.admission_decided(&job, &Admission::Admit);
        fanout.node_scored(&job, "m1", -100);

        let expected = vec!["p1:true".to_string(), "m1=-100".to_string()];
        assert_eq!(*a.0.lock().unwrap(), expected);
        assert_eq!(*b.0.lock().unwrap(), expected);
    }
}
