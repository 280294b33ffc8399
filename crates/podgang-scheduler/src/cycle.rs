//! One scheduling cycle for one job, driven the way a host would.
//!
//! Admission runs once. An admitted job has every candidate node scored;
//! nodes that fail to score are set aside, and the rest are normalized
//! together and ranked best first.

use serde::Serialize;

use podgang_core::{Job, NodeScore};
use podgang_placement::sort_best_first;

use crate::admission::Admission;
use crate::error::SchedulerResult;
use crate::plugin::GangScheduler;

/// A node dropped from the job's round, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedNode {
    pub node: String,
    pub reason: String,
}

/// What a cycle decided for one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CycleOutcome {
    /// The gang check turned the job away this cycle.
    Rejected { job: String, reason: String },
    /// No candidate could be scored.
    Unplaceable {
        job: String,
        excluded: Vec<ExcludedNode>,
    },
    /// Normalized scores, best node first.
    Ranked {
        job: String,
        scores: Vec<NodeScore>,
        excluded: Vec<ExcludedNode>,
    },
}

impl CycleOutcome {
    pub fn job(&self) -> &str {
        match self {
            CycleOutcome::Rejected { job, .. }
            | CycleOutcome::Unplaceable { job, .. }
            | CycleOutcome::Ranked { job, .. } => job,
        }
    }

    /// The node the job would be placed on.
    pub fn best_node(&self) -> Option<&str> {
        match self {
            CycleOutcome::Ranked { scores, .. } => scores.first().map(|s| s.name.as_str()),
            _ => None,
        }
    }
}

/// Run admission, scoring, and normalization for `job` over `nodes`.
pub fn run_cycle<S: AsRef<str>>(
    plugin: &GangScheduler,
    job: &Job,
    nodes: &[S],
) -> SchedulerResult<CycleOutcome> {
    if let Admission::Reject(reason) = plugin.pre_filter(job) {
        return Ok(CycleOutcome::Rejected {
            job: job.name.clone(),
            reason: reason.to_string(),
        });
    }

    let mut scores = Vec::with_capacity(nodes.len());
    let mut excluded = Vec::new();
    for node in nodes {
        let node = node.as_ref();
        match plugin.score(job, node) {
            Ok(score) => scores.push(NodeScore::new(node, score)),
            Err(error) => excluded.push(ExcludedNode {
                node: node.to_string(),
                reason: error.to_string(),
            }),
        }
    }

    if scores.is_empty() {
        return Ok(CycleOutcome::Unplaceable {
            job: job.name.clone(),
            excluded,
        });
    }

    plugin.normalize_score(job, &mut scores)?;
    sort_best_first(&mut scores);

    Ok(CycleOutcome::Ranked {
        job: job.name.clone(),
        scores,
        excluded,
    })
}
