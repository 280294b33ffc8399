//! A snapshot that can be swapped while the plugin holds on to it.
//!
//! The plugin is built once with its collaborators. `SharedSnapshot` lets
//! the host refresh cluster state between cycles without rebuilding it.
//! Each query reads whichever snapshot is current at that moment.

use std::sync::{Arc, RwLock};

use podgang_core::{
    GroupMembershipSource, GroupSnapshot, LookupError, LookupResult, ResourceInventory,
};

use crate::snapshot::ClusterSnapshot;

#[derive(Debug, Default)]
pub struct SharedSnapshot {
    current: RwLock<Arc<ClusterSnapshot>>,
}

impl SharedSnapshot {
    pub fn new(snapshot: ClusterSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The snapshot in effect right now.
    pub fn current(&self) -> LookupResult<Arc<ClusterSnapshot>> {
        self.current
            .read()
            .map(|guard| Arc::clone(&*guard))
            .map_err(|_| LookupError::Unavailable("snapshot lock poisoned".to_string()))
    }

    /// Install a newer snapshot.
    pub fn replace(&self, snapshot: ClusterSnapshot) -> LookupResult<()> {
        let mut guard = self
            .current
            .write()
            .map_err(|_| LookupError::Unavailable("snapshot lock poisoned".to_string()))?;
        *guard = Arc::new(snapshot);
        Ok(())
    }
}

impl GroupMembershipSource for SharedSnapshot {
    fn group_snapshot(&self, group: &str) -> LookupResult<GroupSnapshot> {
        self.current()?.group_snapshot(group)
    }
}

impl ResourceInventory for SharedSnapshot {
    fn allocatable(&self, node: &str) -> LookupResult<u64> {
        self.current()?.allocatable(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Job, NodeInfo};

    fn members(n: usize) -> ClusterSnapshot {
        let jobs = (0..n)
            .map(|i| Job::gang(format!("pod{i}"), "g1", 1))
            .collect();
        ClusterSnapshot::new(jobs, vec![NodeInfo::new("m1", 64)]).unwrap()
    }

    #[test]
    fn replace_is_visible_to_queries() {
        let shared = SharedSnapshot::new(members(1));
        assert_eq!(shared.group_snapshot("g1").unwrap().member_count, 1);

        shared.replace(members(4)).unwrap();
        assert_eq!(shared.group_snapshot("g1").unwrap().member_count, 4);
        assert_eq!(shared.allocatable("m1").unwrap(), 64);
    }

    #[test]
    fn held_snapshot_is_unaffected_by_replace() {
        let shared = SharedSnapshot::new(members(2));
        let held = shared.current().unwrap();
        shared.replace(members(5)).unwrap();
        assert_eq!(held.count_group_members("g1"), 2);
    }
}
