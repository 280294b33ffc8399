//! podgang-scheduler — the gang scheduling plugin.
//!
//! Exposes the three hooks a host scheduler calls for each job:
//!
//! - `pre_filter` — gang admission against the group's current membership
//! - `score` — raw score for one candidate node
//! - `normalize_score` — rescale the job's batch onto `0..=100`
//!
//! # Architecture
//!
//! ```text
//! GangScheduler
//!   ├── AdmissionChecker (GroupMembershipSource → Admission)
//!   ├── ResourceInventory (node name → allocatable memory)
//!   ├── ScoringMode (fixed at construction)
//!   └── SchedulingObserver (tracing, metrics, ...)
//!
//! run_cycle: pre_filter → score × N → normalize_score
//! ```

pub mod admission;
pub mod cycle;
pub mod error;
pub mod observer;
pub mod plugin;

pub use admission::{Admission, AdmissionChecker, RejectReason, check_admission};
pub use cycle::{CycleOutcome, ExcludedNode, run_cycle};
pub use error::{SchedulerError, SchedulerResult};
pub use observer::{FanoutObserver, NoopObserver, SchedulingObserver, TracingObserver};
pub use plugin::{GangScheduler, PLUGIN_NAME};
