//! podgang-metrics — counters for the gang scheduling plugin.
//!
//! # Architecture
//!
//! ```text
//! MetricsCollector (SchedulingObserver)
//!   ├── admission_decided() ← admits, rejects by reason
//!   ├── node_scored() / node_score_failed()
//!   ├── batch_normalized() / normalize_failed()
//!   └── snapshot() → MetricsSnapshot
//!
//! Prometheus exposition
//!   └── render_prometheus() → text/plain
//! ```

pub mod collector;
pub mod prometheus;

pub use collector::{MetricsCollector, MetricsSnapshot};
pub use prometheus::render_prometheus;
