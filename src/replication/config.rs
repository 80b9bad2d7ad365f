//! Replication configuration.

use crate::instance::Instance;
use crate::vns::VnsConfig;

/// Seeds for instances with at most [`ReplicationConfig::large_threshold`] tasks.
pub const SMALL_SEEDS: [u64; 13] = [0, 1, 7, 13, 17, 23, 31, 47, 42, 73, 202, 101, 606];

/// Seeds for instances with more than [`ReplicationConfig::large_threshold`] tasks.
pub const LARGE_SEEDS: [u64; 13] = [
    97, 131, 197, 223, 281, 313, 487, 557, 613, 733, 1707, 1905, 1936,
];

/// Configuration for a multi-seed run on one instance.
///
/// The replication count is the length of the selected seed list.
///
/// # Defaults
///
/// ```
/// use u_alwabp::replication::ReplicationConfig;
///
/// let config = ReplicationConfig::default();
/// assert_eq!(config.small_seeds.len(), 13);
/// assert_eq!(config.large_threshold, 50);
/// assert_eq!(config.time_budget_ms, Some(600_000));
/// assert_eq!(config.vns.max_iterations, 500);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplicationConfig {
    /// Seeds used for small instances, in run order.
    pub small_seeds: Vec<u64>,

    /// Seeds used for large instances, in run order.
    pub large_seeds: Vec<u64>,

    /// Instances with more tasks than this use `large_seeds`.
    pub large_threshold: usize,

    /// Wall-clock budget shared by all replications of one instance, in
    /// milliseconds.
    ///
    /// No replication starts once the budget is spent; the one in flight
    /// stops at its next iteration boundary. The first replication always
    /// starts. `None` disables the budget.
    pub time_budget_ms: Option<u64>,

    /// Independent constructions per replication; the best one seeds the
    /// search.
    pub construction_starts: usize,

    /// Parameters for every VNS run.
    pub vns: VnsConfig,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            small_seeds: SMALL_SEEDS.to_vec(),
            large_seeds: LARGE_SEEDS.to_vec(),
            large_threshold: 50,
            time_budget_ms: Some(600_000),
            construction_starts: 3,
            vns: VnsConfig::default(),
        }
    }
}

impl ReplicationConfig {
    /// Sets the seed list for small instances.
    pub fn with_small_seeds(mut self, seeds: Vec<u64>) -> Self {
        self.small_seeds = seeds;
        self
    }

    /// Sets the seed list for large instances.
    pub fn with_large_seeds(mut self, seeds: Vec<u64>) -> Self {
        self.large_seeds = seeds;
        self
    }

    /// Uses the same seed list regardless of instance size.
    pub fn with_seeds(self, seeds: Vec<u64>) -> Self {
        self.with_small_seeds(seeds.clone()).with_large_seeds(seeds)
    }

    /// Sets the task count above which `large_seeds` are used.
    pub fn with_large_threshold(mut self, tasks: usize) -> Self {
        self.large_threshold = tasks;
        self
    }

    /// Sets the per-instance wall-clock budget in milliseconds.
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = Some(ms);
        self
    }

    /// Removes the wall-clock budget.
    pub fn without_time_budget(mut self) -> Self {
        self.time_budget_ms = None;
        self
    }

    /// Sets the number of constructions per replication.
    pub fn with_construction_starts(mut self, n: usize) -> Self {
        self.construction_starts = n;
        self
    }

    /// Sets the VNS parameters.
    pub fn with_vns(mut self, vns: VnsConfig) -> Self {
        self.vns = vns;
        self
    }

    /// Returns the seed list selected for `instance` by its task count.
    pub fn seeds_for(&self, instance: &Instance) -> &[u64] {
        if instance.task_count() > self.large_threshold {
            &self.large_seeds
        } else {
            &self.small_seeds
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.small_seeds.is_empty() {
            return Err("small_seeds must not be empty".into());
        }
        if self.large_seeds.is_empty() {
            return Err("large_seeds must not be empty".into());
        }
        if self.construction_starts == 0 {
            return Err("construction_starts must be at least 1".into());
        }
        self.vns.validate().map_err(|e| format!("vns: {e}"))
    }
}
