//! The gang scheduling plugin.
//!
//! `GangScheduler` owns the configured scoring mode and the injected
//! collaborators, and exposes one method per host extension point. It
//! holds no per-job state, so one instance can serve concurrent cycles.

use std::sync::Arc;

use tracing::info;

use podgang_core::{
    Candidate, GroupMembershipSource, Job, NodeScore, PluginConfig, ResourceInventory,
    ScoringMode,
};
use podgang_placement::{NormalizeResult, ScoreError, ScoreResult};
use podgang_placement::{normalize_scores, score_candidate};

use crate::admission::{Admission, AdmissionChecker};
use crate::error::SchedulerResult;
use crate::observer::{SchedulingObserver, TracingObserver};

/// Name the plugin registers under with the host.
pub const PLUGIN_NAME: &str = "CustomScheduler";

/// Gang admission plus allocatable-memory scoring.
pub struct GangScheduler {
    mode: ScoringMode,
    admission: AdmissionChecker,
    inventory: Arc<dyn ResourceInventory>,
    observer: Arc<dyn SchedulingObserver>,
}

impl GangScheduler {
    /// Create a plugin from a validated configuration.
    ///
    /// Events go to a [`TracingObserver`] until replaced with
    /// [`GangScheduler::with_observer`].
    pub fn new(
        config: PluginConfig,
        membership: Arc<dyn GroupMembershipSource>,
        inventory: Arc<dyn ResourceInventory>,
    ) -> Self {
        info!(plugin = PLUGIN_NAME, mode = %config.mode, "gang scheduler configured");
        Self {
            mode: config.mode,
            admission: AdmissionChecker::new(membership),
            inventory,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Create a plugin from the host's raw JSON args.
    ///
    /// Fails when the args name an unknown mode; no cycle ever runs with
    /// an unvalidated mode.
    pub fn from_args(
        raw: Option<&[u8]>,
        membership: Arc<dyn GroupMembershipSource>,
        inventory: Arc<dyn ResourceInventory>,
    ) -> SchedulerResult<Self> {
        let config = PluginConfig::from_args(raw)?;
        Ok(Self::new(config, membership, inventory))
    }

    pub fn with_observer(mut self, observer: Arc<dyn SchedulingObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Gang admission for `job`.
    pub fn pre_filter(&self, job: &Job) -> Admission {
        let admission = self.admission.check(job);
        self.observer.admission_decided(job, &admission);
        admission
    }

    /// Raw score of `node` for `job`.
    ///
    /// An error excludes this node from the job's round; it says nothing
    /// about the other nodes.
    pub fn score(&self, job: &Job, node: &str) -> ScoreResult<i64> {
        let result = self
            .inventory
            .allocatable(node)
            .map_err(ScoreError::from)
            .and_then(|allocatable| {
                score_candidate(&Candidate::new(node, allocatable), self.mode)
            });

        match &result {
            Ok(score) => self.observer.node_scored(job, node, *score),
            Err(error) => self.observer.node_score_failed(job, node, error),
        }
        result
    }

    /// Normalize the job's raw scores in place.
    pub fn normalize_score(&self, job: &Job, scores: &mut [NodeScore]) -> NormalizeResult<()> {
        let result = normalize_scores(scores);
        match &result {
            Ok(()) => self.observer.batch_normalized(job, scores),
            Err(error) => self.observer.normalize_failed(job, error),
        }
        result
    }
}
