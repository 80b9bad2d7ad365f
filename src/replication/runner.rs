//! Sequential multi-seed driver for one instance.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::ReplicationConfig;
use super::types::{ReplicationRecord, ReplicationSummary};
use crate::error::AlwabpError;
use crate::instance::Instance;
use crate::solution::build_initial_multi;
use crate::vns::{LineBalancing, Termination, VnsRunner};

/// Runs one VNS replication per seed and keeps the best.
///
/// Replications run strictly in seed order. Each owns a
/// [`StdRng`] seeded with its seed, used for construction and shaking, so
/// a run without a budget cutoff is reproducible bit for bit.
#[derive(Debug, Clone)]
pub struct ReplicationManager {
    config: ReplicationConfig,
}

impl ReplicationManager {
    /// Creates a manager with the given configuration.
    pub fn new(config: ReplicationConfig) -> Self {
        Self { config }
    }

    /// The manager's configuration.
    pub fn config(&self) -> &ReplicationConfig {
        &self.config
    }

    /// Optimizes `instance`, reporting results under `name`.
    ///
    /// The budget is checked before each replication after the first; a
    /// replication that is already running stops at its next iteration
    /// boundary once the budget has passed.
    ///
    /// # Errors
    ///
    /// [`AlwabpError::InvalidConfig`] if the configuration does not
    /// validate, [`AlwabpError::ConstructionFailed`] if no feasible
    /// starting assignment can be built.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_alwabp::instance::Instance;
    /// use u_alwabp::replication::{ReplicationConfig, ReplicationManager};
    ///
    /// let instance = Instance::new(
    ///     vec![vec![2.0, 3.0, 4.0], vec![5.0, 3.0, 1.0]],
    ///     vec![(0, 1), (1, 2)],
    /// )
    /// .unwrap();
    /// let manager = ReplicationManager::new(ReplicationConfig::default().with_seeds(vec![1, 2]));
    /// let summary = manager.run("chain", &instance).unwrap();
    /// assert!(summary.best_objective <= summary.initial_objective);
    /// assert_eq!(summary.replications.len(), 2);
    /// ```
    #[tracing::instrument(
        level = "debug",
        skip(self, instance),
        fields(tasks = instance.task_count(), workers = instance.worker_count())
    )]
    pub fn run(&self, name: &str, instance: &Instance) -> Result<ReplicationSummary, AlwabpError> {
        self.config.validate().map_err(AlwabpError::InvalidConfig)?;

        let seeds = self.config.seeds_for(instance);
        let budget = self.config.time_budget_ms.map(Duration::from_millis);
        let problem = LineBalancing::new(instance, &self.config.vns);

        let started = Instant::now();
        let deadline = budget.and_then(|b| started.checked_add(b));
        let mut replications: Vec<ReplicationRecord> = Vec::with_capacity(seeds.len());
        let mut best_index = 0;
        let mut budget_exhausted = false;

        for (index, &seed) in seeds.iter().enumerate() {
            if index > 0 && budget.is_some_and(|b| started.elapsed() >= b) {
                tracing::info!(
                    completed = index,
                    planned = seeds.len(),
                    "time budget spent, skipping remaining seeds"
                );
                budget_exhausted = true;
                break;
            }

            let replication_start = Instant::now();
            let mut rng = StdRng::seed_from_u64(seed);
            let initial = build_initial_multi(instance, self.config.construction_starts, &mut rng)?;
            tracing::debug!(index, seed, initial = initial.objective(), "replication started");

            let result = VnsRunner::run(&problem, initial, &self.config.vns, &mut rng, deadline);
            if result.termination == Termination::Deadline {
                budget_exhausted = true;
            }

            let record = ReplicationRecord {
                index,
                seed,
                initial_objective: result.initial_cost,
                final_objective: result.best_cost,
                elapsed: replication_start.elapsed(),
                iterations: result.iterations,
                improvements: result.improvements,
                termination: result.termination,
                assignment: result.best,
            };
            tracing::debug!(
                index,
                seed,
                objective = record.final_objective,
                iterations = record.iterations,
                termination = %record.termination,
                "replication finished"
            );

            if let Some(best) = replications.get(best_index) {
                if record.final_objective < best.final_objective {
                    best_index = index;
                }
            }
            replications.push(record);
        }

        let total_time = started.elapsed();
        let (Some(first), Some(best)) = (replications.first(), replications.get(best_index)) else {
            return Err(AlwabpError::InvalidConfig("empty seed list".into()));
        };
        let (initial_objective, best_seed, best_objective) =
            (first.initial_objective, best.seed, best.final_objective);
        let summary = ReplicationSummary {
            instance_name: name.to_string(),
            best_seed,
            initial_objective,
            best_objective,
            total_time,
            budget_exhausted,
            best_index,
            replications,
        };

        tracing::info!(
            instance = %summary.instance_name,
            si = summary.initial_objective,
            sf = summary.best_objective,
            best_seed = summary.best_seed,
            seconds = summary.total_time.as_secs_f64(),
            "instance solved"
        );
        Ok(summary)
    }
}
