//! Core domain types shared across podgang crates.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::QuorumError;

/// Label naming the gang a job belongs to.
pub const GROUP_LABEL: &str = "podGroup";

/// Label carrying the minimum number of gang members required for admission.
pub const MIN_AVAILABLE_LABEL: &str = "minAvailable";

/// Lowest score a node can hold after normalization.
pub const MIN_NODE_SCORE: i64 = 0;

/// Highest score a node can hold after normalization.
pub const MAX_NODE_SCORE: i64 = 100;

// ── Job ───────────────────────────────────────────────────────────

/// A unit of work asking to be placed.
///
/// Gang metadata travels as labels, the way the host framework hands it
/// over. Use [`Job::gang`] to build one from typed values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

impl Job {
    /// A job with no gang metadata.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: HashMap::new(),
        }
    }

    /// A job belonging to `group` that needs `quorum` members before it
    /// may be placed.
    pub fn gang(name: impl Into<String>, group: impl Into<String>, quorum: u64) -> Self {
        Self::new(name)
            .with_label(GROUP_LABEL, group)
            .with_label(MIN_AVAILABLE_LABEL, quorum.to_string())
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// The gang this job belongs to. An empty label value counts as no gang.
    pub fn group(&self) -> Option<&str> {
        self.labels
            .get(GROUP_LABEL)
            .map(String::as_str)
            .filter(|g| !g.is_empty())
    }

    /// Parse the required quorum from the `minAvailable` label.
    ///
    /// Only non-negative integers are accepted; anything else is an error
    /// so that callers can fail closed.
    pub fn quorum(&self) -> Result<u64, QuorumError> {
        let raw = self
            .labels
            .get(MIN_AVAILABLE_LABEL)
            .ok_or(QuorumError::Missing)?;
        raw.parse::<u64>()
            .map_err(|_| QuorumError::Malformed(raw.clone()))
    }
}

// ── Group membership ──────────────────────────────────────────────

/// Point-in-time count of the jobs sharing one group identity.
///
/// Owned by the cluster state collaborator and possibly stale by the time
/// it is read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupSnapshot {
    pub group: String,
    pub member_count: usize,
}

impl GroupSnapshot {
    pub fn new(group: impl Into<String>, member_count: usize) -> Self {
        Self {
            group: group.into(),
            member_count,
        }
    }
}

// ── Candidates and scores ─────────────────────────────────────────

/// A placement target and the resource quantity it can still offer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    /// Allocatable memory in bytes.
    pub allocatable: u64,
}

impl Candidate {
    pub fn new(name: impl Into<String>, allocatable: u64) -> Self {
        Self {
            name: name.into(),
            allocatable,
        }
    }
}

/// Score for one node within a single job's scoring round.
///
/// Holds the raw score until normalization rewrites it in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeScore {
    pub name: String,
    pub score: i64,
}

impl NodeScore {
    pub fn new(name: impl Into<String>, score: i64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}
