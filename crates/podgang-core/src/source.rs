//! Read-only capabilities supplied by the cluster state collaborator.
//!
//! The plugin never reaches into shared infrastructure on its own; the
//! host injects implementations of these traits at construction.

use crate::error::LookupResult;
use crate::types::GroupSnapshot;

/// Counts the jobs currently known to share a group identity.
pub trait GroupMembershipSource: Send + Sync {
    fn group_snapshot(&self, group: &str) -> LookupResult<GroupSnapshot>;
}

/// Reports how much of the scored resource a node can still offer.
pub trait ResourceInventory: Send + Sync {
    /// Allocatable memory in bytes for `node`.
    fn allocatable(&self, node: &str) -> LookupResult<u64>;
}
