//! Multi-seed replications for one instance under a shared time budget.
//!
//! [`ReplicationManager::run`] builds a starting assignment and runs the
//! VNS once per seed, then reports SI (first initial objective), SF (best
//! final objective), the winning seed and the total elapsed time.

mod config;
mod runner;
mod types;

pub use config::{ReplicationConfig, LARGE_SEEDS, SMALL_SEEDS};
pub use runner::ReplicationManager;
pub use types::{ReplicationRecord, ReplicationSummary};
