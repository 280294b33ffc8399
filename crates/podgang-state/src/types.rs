//! Records stored in a cluster snapshot.

use serde::{Deserialize, Serialize};

pub use podgang_core::Job;

/// A node as reported by the cluster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeInfo {
    pub name: String,
    /// Total memory on this node (bytes).
    #[serde(default)]
    pub capacity_memory_bytes: u64,
    /// Memory still available to new work (bytes).
    pub allocatable_memory_bytes: u64,
}

impl NodeInfo {
    pub fn new(name: impl Into<String>, allocatable_memory_bytes: u64) -> Self {
        Self {
            name: name.into(),
            capacity_memory_bytes: allocatable_memory_bytes,
            allocatable_memory_bytes,
        }
    }
}
