//! podgang-state — the cluster state the plugin reads from.
//!
//! A [`ClusterSnapshot`] holds the jobs and nodes observed at one point in
//! time. It is loaded from JSON and answers the membership and inventory
//! queries defined in `podgang-core`.
//!
//! ```text
//! ClusterSnapshot
//!   ├── jobs  → GroupMembershipSource (count by podGroup label)
//!   └── nodes → ResourceInventory (allocatable memory by node name)
//!
//! SharedSnapshot
//!   └── swaps in a fresh ClusterSnapshot between cycles
//! ```

pub mod error;
pub mod shared;
pub mod snapshot;
pub mod types;

pub use error::{StateError, StateResult};
pub use shared::SharedSnapshot;
pub use snapshot::ClusterSnapshot;
pub use types::*;
