//! In-memory cluster snapshot.
//!
//! The snapshot is immutable once built. Refreshing cluster state means
//! loading a new snapshot, so concurrent readers never observe a partial
//! update.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use podgang_core::{
    GROUP_LABEL, GroupMembershipSource, GroupSnapshot, LookupError, LookupResult,
    ResourceInventory,
};

use crate::error::{StateError, StateResult};
use crate::types::{Job, NodeInfo};

/// On-disk layout of a snapshot.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    jobs: Vec<Job>,
    #[serde(default)]
    nodes: Vec<NodeInfo>,
}

/// Jobs and nodes observed at one point in time.
#[derive(Debug, Clone, Default)]
pub struct ClusterSnapshot {
    jobs: Vec<Job>,
    nodes: BTreeMap<String, NodeInfo>,
}

impl ClusterSnapshot {
    /// Build a snapshot, rejecting duplicate node names.
    pub fn new(jobs: Vec<Job>, nodes: Vec<NodeInfo>) -> StateResult<Self> {
        let mut by_name = BTreeMap::new();
        for node in nodes {
            if by_name.contains_key(&node.name) {
                return Err(StateError::DuplicateNode(node.name));
            }
            by_name.insert(node.name.clone(), node);
        }
        Ok(Self {
            jobs,
            nodes: by_name,
        })
    }

    pub fn from_json_str(content: &str) -> StateResult<Self> {
        let file: SnapshotFile = serde_json::from_str(content)?;
        Self::new(file.jobs, file.nodes)
    }

    pub fn from_file(path: &Path) -> StateResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&content)?;
        debug!(
            path = ?path,
            jobs = snapshot.jobs.len(),
            nodes = snapshot.nodes.len(),
            "cluster snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn to_json_string(&self) -> StateResult<String> {
        let file = SnapshotFile {
            jobs: self.jobs.clone(),
            nodes: self.nodes.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, name: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.name == name)
    }

    /// Nodes ordered by name.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeInfo> {
        self.nodes.values()
    }

    pub fn node(&self, name: &str) -> Option<&NodeInfo> {
        self.nodes.get(name)
    }

    /// Number of jobs whose group label equals `group`.
    pub fn count_group_members(&self, group: &str) -> usize {
        self.jobs
            .iter()
            .filter(|j| j.labels.get(GROUP_LABEL).is_some_and(|g| g == group))
            .count()
    }
}

impl GroupMembershipSource for ClusterSnapshot {
    fn group_snapshot(&self, group: &str) -> LookupResult<GroupSnapshot> {
        Ok(GroupSnapshot::new(group, self.count_group_members(group)))
    }
}

impl ResourceInventory for ClusterSnapshot {
    fn allocatable(&self, node: &str) -> LookupResult<u64> {
        self.nodes
            .get(node)
            .map(|n| n.allocatable_memory_bytes)
            .ok_or_else(|| LookupError::NodeNotFound(node.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "jobs": [
            {"name": "pod0", "labels": {"podGroup": "g1"}},
            {"name": "pod1", "labels": {"podGroup": "g1"}},
            {"name": "pod2", "labels": {"podGroup": "g1"}},
            {"name": "other", "labels": {"podGroup": "g2"}},
            {"name": "solo"}
        ],
        "nodes": [
            {"name": "m2", "allocatable_memory_bytes": 200},
            {"name": "m1", "capacity_memory_bytes": 1000, "allocatable_memory_bytes": 100}
        ]
    }"#;

    #[test]
    fn counts_members_by_group_label() {
        let snapshot = ClusterSnapshot::from_json_str(SAMPLE).unwrap();
        assert_eq!(snapshot.count_group_members("g1"), 3);
        assert_eq!(snapshot.count_group_members("g2"), 1);
        assert_eq!(snapshot.count_group_members("missing"), 0);

        let group = snapshot.group_snapshot("g1").unwrap();
        assert_eq!(group, GroupSnapshot::new("g1", 3));
    }

    #[test]
    fn inventory_reports_allocatable() {
        let snapshot = ClusterSnapshot::from_json_str(SAMPLE).unwrap();
        assert_eq!(snapshot.allocatable("m1").unwrap(), 100);
        assert_eq!(snapshot.allocatable("m2").unwrap(), 200);
        assert_eq!(
            snapshot.allocatable("m9"),
            Err(LookupError::NodeNotFound("m9".to_string()))
        );
    }

    #[test]
    fn nodes_are_ordered_by_name() {
        let snapshot = ClusterSnapshot::from_json_str(SAMPLE).unwrap();
        let names: Vec<&str> = snapshot.nodes().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["m1", "m2"]);
    }

    #[test]
    fn duplicate_nodes_rejected() {
        let err = ClusterSnapshot::new(
            Vec::new(),
            vec![NodeInfo::new("m1", 1), NodeInfo::new("m1", 2)],
        )
        .unwrap_err();
        assert!(matches!(err, StateError::DuplicateNode(ref n) if n == "m1"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cluster.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let snapshot = ClusterSnapshot::from_file(&path).unwrap();
        assert_eq!(snapshot.jobs().len(), 5);
        assert!(snapshot.job("solo").is_some());

        let reloaded = ClusterSnapshot::from_json_str(&snapshot.to_json_string().unwrap()).unwrap();
        assert_eq!(reloaded.count_group_members("g1"), 3);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClusterSnapshot::from_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StateError::Read(_)));
    }
}
