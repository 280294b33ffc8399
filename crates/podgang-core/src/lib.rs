//! podgang-core — shared types for the gang admission and scoring plugin.
//!
//! Everything the other crates agree on lives here: the job and candidate
//! model, the scoring mode, plugin configuration, and the read-only
//! collaborator traits through which cluster state is queried.

pub mod config;
pub mod error;
pub mod source;
pub mod types;

pub use config::{PluginConfig, ScoringMode};
pub use error::{ConfigError, ConfigResult, LookupError, LookupResult, QuorumError};
pub use source::{GroupMembershipSource, ResourceInventory};
pub use types::*;
