//! Replication results.

use std::time::Duration;

use crate::solution::Assignment;
use crate::vns::Termination;

/// Outcome of one seeded VNS run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReplicationRecord {
    /// 0-based position in the seed list.
    pub index: usize,
    /// Seed of the replication's random generator.
    pub seed: u64,
    /// Objective of the constructed starting assignment.
    pub initial_objective: f64,
    /// Objective of the best assignment found.
    pub final_objective: f64,
    /// Wall-clock time spent in this replication.
    pub elapsed: Duration,
    /// Shake + local-search cycles executed.
    pub iterations: usize,
    /// Accepted improvements.
    pub improvements: usize,
    /// Why the VNS stopped.
    pub termination: Termination,
    /// Best assignment found.
    pub assignment: Assignment,
}

/// Per-instance summary across replications.
///
/// At least one replication always runs, so [`best`](Self::best) is
/// always available.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReplicationSummary {
    /// Instance name as given to the manager.
    pub instance_name: String,
    /// Seed of the best replication (earliest on ties).
    pub best_seed: u64,
    /// SI: initial objective of the first replication.
    pub initial_objective: f64,
    /// SF: best final objective across replications.
    pub best_objective: f64,
    /// Wall-clock time from the first replication's start to the end of
    /// the last one.
    pub total_time: Duration,
    /// True when the budget stopped the run before every seed was used,
    /// or cut a replication short.
    pub budget_exhausted: bool,
    /// Completed replications in seed order.
    pub replications: Vec<ReplicationRecord>,
    pub(crate) best_index: usize,
}

impl ReplicationSummary {
    /// The replication that produced [`best_objective`](Self::best_objective).
    pub fn best(&self) -> &ReplicationRecord {
        &self.replications[self.best_index]
    }

    /// The best assignment found for the instance.
    pub fn best_assignment(&self) -> &Assignment {
        &self.best().assignment
    }
}
