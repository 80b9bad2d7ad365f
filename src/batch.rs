//! Multi-instance driver.
//!
//! Each instance gets its own [`ReplicationManager`] run with no shared
//! mutable state. With the `parallel` feature the instances are spread
//! over the rayon thread pool; results always come back in input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::AlwabpError;
use crate::instance::Instance;
use crate::replication::{ReplicationConfig, ReplicationManager, ReplicationSummary};

/// An instance paired with the name it is reported under.
#[derive(Debug, Clone)]
pub struct NamedInstance {
    /// Label used in logs and in the summary's `instance_name`.
    pub name: String,
    /// The problem data.
    pub instance: Instance,
}

impl NamedInstance {
    /// Pairs `instance` with `name`.
    pub fn new(name: impl Into<String>, instance: Instance) -> Self {
        Self {
            name: name.into(),
            instance,
        }
    }
}

/// Result for one instance of a batch.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Name of the instance this outcome belongs to.
    pub name: String,
    /// The instance's summary, or the error that stopped it.
    pub result: Result<ReplicationSummary, AlwabpError>,
}

/// Optimizes every instance with the same configuration.
///
/// A failing instance yields an `Err` outcome and does not affect the
/// others.
pub fn solve_all(instances: &[NamedInstance], config: &ReplicationConfig) -> Vec<BatchOutcome> {
    #[cfg(feature = "parallel")]
    {
        instances
            .par_iter()
            .map(|named| solve_one(named, config))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        instances
            .iter()
            .map(|named| solve_one(named, config))
            .collect()
    }
}

fn solve_one(named: &NamedInstance, config: &ReplicationConfig) -> BatchOutcome {
    let result = ReplicationManager::new(config.clone()).run(&named.name, &named.instance);
    if let Err(err) = &result {
        tracing::warn!(instance = %named.name, error = %err, "instance failed");
    }
    BatchOutcome {
        name: named.name.clone(),
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vns::VnsConfig;

    fn chain() -> Instance {
        Instance::new(
            vec![vec![2.0, 3.0, 4.0], vec![5.0, 3.0, 1.0]],
            vec![(0, 1), (1, 2)],
        )
        .unwrap()
    }

    fn quick() -> ReplicationConfig {
        ReplicationConfig::default()
            .without_time_budget()
            .with_seeds(vec![1, 2])
            .with_vns(VnsConfig::default().with_max_iterations(50))
    }

    #[test]
    fn test_outcomes_in_input_order() {
        let batch = vec![
            NamedInstance::new("a", chain()),
            NamedInstance::new("b", chain()),
            NamedInstance::new("c", chain()),
        ];
        let outcomes = solve_all(&batch, &quick());

        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        for outcome in &outcomes {
            let summary = outcome.result.as_ref().unwrap();
            assert_eq!(summary.instance_name, outcome.name);
            assert!(summary.best_objective <= 9.0);
        }
    }

    #[test]
    fn test_failure_is_isolated() {
        // Worker 1 owns both ends of the chain, worker 0 only the middle:
        // no station order satisfies the precedences.
        let impossible = Instance::new(
            vec![
                vec![f64::INFINITY, 1.0, f64::INFINITY],
                vec![1.0, f64::INFINITY, 1.0],
            ],
            vec![(0, 1), (1, 2)],
        )
        .unwrap();
        let batch = vec![
            NamedInstance::new("before", chain()),
            NamedInstance::new("impossible", impossible),
            NamedInstance::new("after", chain()),
        ];

        let outcomes = solve_all(&batch, &quick());

        assert!(outcomes[0].result.is_ok());
        assert!(matches!(
            outcomes[1].result,
            Err(AlwabpError::ConstructionFailed { .. })
        ));
        assert!(outcomes[2].result.is_ok());
    }

    #[test]
    fn test_same_result_as_single_run() {
        let batch = vec![NamedInstance::new("chain", chain())];
        let outcomes = solve_all(&batch, &quick());
        let single = ReplicationManager::new(quick()).run("chain", &chain()).unwrap();

        let summary = outcomes[0].result.as_ref().unwrap();
        assert_eq!(summary.best_seed, single.best_seed);
        assert_eq!(summary.best_objective, single.best_objective);
        assert_eq!(summary.best_assignment(), single.best_assignment());
    }
}
