//! Randomized greedy construction of feasible initial assignments.
//!
//! One attempt:
//!
//! 1. Shuffle the workers over the stations.
//! 2. Draw a random topological order (Kahn's algorithm with a random pick
//!    from the ready set).
//! 3. Place each task in the earliest station at or after its predecessors
//!    whose worker can perform it and whose load stays within the instance
//!    lower bound; if no station fits, use the compatible station with the
//!    smallest resulting load.
//!
//! If step 3 strands a task, the same permutation is retried with plain
//! earliest-compatible placement before a new permutation is drawn.

use rand::seq::SliceRandom;
use rand::Rng;

use super::assignment::Assignment;
use crate::error::AlwabpError;
use crate::instance::Instance;

/// Number of worker permutations tried before giving up.
pub const MAX_CONSTRUCTION_ATTEMPTS: usize = 100;

/// Builds one feasible assignment.
///
/// The result depends only on `instance` and the state of `rng`, so the
/// same seed always yields the same assignment.
///
/// # Errors
///
/// [`AlwabpError::ConstructionFailed`] if no attempt produced a feasible
/// placement.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_alwabp::instance::Instance;
/// use u_alwabp::solution::build_initial;
///
/// let instance = Instance::new(
///     vec![vec![2.0, 3.0, 4.0], vec![5.0, 3.0, 1.0]],
///     vec![(0, 1), (1, 2)],
/// )
/// .unwrap();
/// let a = build_initial(&instance, &mut StdRng::seed_from_u64(7)).unwrap();
/// let b = build_initial(&instance, &mut StdRng::seed_from_u64(7)).unwrap();
/// assert_eq!(a, b);
/// assert!(a.validate(&instance).is_ok());
/// ```
pub fn build_initial<R: Rng>(instance: &Instance, rng: &mut R) -> Result<Assignment, AlwabpError> {
    let target = instance.lower_bound();

    for _ in 0..MAX_CONSTRUCTION_ATTEMPTS {
        let mut workers: Vec<usize> = (0..instance.worker_count()).collect();
        workers.shuffle(rng);
        let order = random_topological_order(instance, rng);

        let placed = place(instance, &workers, &order, Some(target))
            .or_else(|| place(instance, &workers, &order, None));
        if let Some(task_station) = placed {
            if let Ok(assignment) = Assignment::from_parts(instance, task_station, workers) {
                return Ok(assignment);
            }
        }
    }

    Err(AlwabpError::ConstructionFailed {
        attempts: MAX_CONSTRUCTION_ATTEMPTS,
    })
}

/// Runs [`build_initial`] `starts` times and keeps the assignment with the
/// lowest objective (earliest wins ties).
///
/// `starts == 0` is treated as 1.
pub fn build_initial_multi<R: Rng>(
    instance: &Instance,
    starts: usize,
    rng: &mut R,
) -> Result<Assignment, AlwabpError> {
    let mut best = build_initial(instance, rng)?;
    for _ in 1..starts {
        let candidate = build_initial(instance, rng)?;
        if candidate.objective() < best.objective() {
            best = candidate;
        }
    }
    Ok(best)
}

fn random_topological_order<R: Rng>(instance: &Instance, rng: &mut R) -> Vec<usize> {
    let n = instance.task_count();
    let mut in_degree: Vec<usize> = (0..n).map(|t| instance.predecessors(t).len()).collect();
    let mut ready: Vec<usize> = (0..n).filter(|&t| in_degree[t] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while !ready.is_empty() {
        let pick = rng.random_range(0..ready.len());
        let task = ready.swap_remove(pick);
        order.push(task);
        for &succ in instance.successors(task) {
            in_degree[succ] -= 1;
            if in_degree[succ] == 0 {
                ready.push(succ);
            }
        }
    }
    order
}

/// Places tasks in `order`. With a `target`, balances loads against it;
/// without one, takes the earliest compatible station.
fn place(
    instance: &Instance,
    workers: &[usize],
    order: &[usize],
    target: Option<f64>,
) -> Option<Vec<usize>> {
    let stations = workers.len();
    let mut task_station = vec![usize::MAX; instance.task_count()];
    let mut load = vec![0.0; stations];

    for &task in order {
        let lo = instance
            .predecessors(task)
            .iter()
            .map(|&p| task_station[p])
            .max()
            .unwrap_or(0);
        let mut compatible = (lo..stations).filter(|&s| instance.is_capable(workers[s], task));

        let chosen = match target {
            None => compatible.next()?,
            Some(target) => {
                let mut fallback: Option<(usize, f64)> = None;
                let mut fit = None;
                for s in compatible {
                    let after = load[s] + instance.time(workers[s], task);
                    if after <= target {
                        fit = Some(s);
                        break;
                    }
                    if fallback.map_or(true, |(_, best)| after < best) {
                        fallback = Some((s, after));
                    }
                }
                fit.or(fallback.map(|(s, _)| s))?
            }
        };

        task_station[task] = chosen;
        load[chosen] += instance.time(workers[chosen], task);
    }
    Some(task_station)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::INFEASIBLE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_chain_respects_order() {
        let inst = Instance::new(
            vec![vec![2.0, 3.0, 4.0], vec![5.0, 3.0, 1.0]],
            vec![(0, 1), (1, 2)],
        )
        .unwrap();
        for seed in 0..20 {
            let a = build_initial(&inst, &mut StdRng::seed_from_u64(seed)).unwrap();
            let s = a.task_station();
            assert!(s[0] <= s[1] && s[1] <= s[2], "seed {seed}: {s:?}");
            assert!(a.validate(&inst).is_ok());
        }
    }

    #[test]
    fn test_balances_independent_tasks() {
        // 4 identical tasks, 2 identical workers: lower bound 2, reachable
        let inst = Instance::new(vec![vec![1.0; 4], vec![1.0; 4]], vec![]).unwrap();
        let a = build_initial(&inst, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a.objective(), 2.0);
    }

    #[test]
    fn test_respects_incapable_workers() {
        // task 1 only by worker 0, task 2 only by worker 1, 1 -> 2
        let inst = Instance::new(
            vec![vec![1.0, INFEASIBLE, 1.0], vec![INFEASIBLE, 1.0, 1.0]],
            vec![(0, 1)],
        )
        .unwrap();
        for seed in 0..20 {
            let a = build_initial(&inst, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert!(a.validate(&inst).is_ok());
            // the only feasible line puts worker 0 first
            assert_eq!(a.station_worker(), &[0, 1]);
        }
    }

    #[test]
    fn test_worker_order_forced_or_impossible() {
        // worker 0 only does task 2, worker 1 only does task 1, 1 -> 2
        let inst = Instance::new(
            vec![vec![INFEASIBLE, 1.0], vec![1.0, INFEASIBLE]],
            vec![(0, 1)],
        )
        .unwrap();
        let a = build_initial(&inst, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a.station_worker(), &[1, 0]);

        // tasks 1 and 3 need worker 0, task 2 needs worker 1, 1 -> 2 -> 3:
        // worker 0 would have to sit both before and after worker 1
        let inst = Instance::new(
            vec![vec![1.0, INFEASIBLE, 1.0], vec![INFEASIBLE, 1.0, INFEASIBLE]],
            vec![(0, 1), (1, 2)],
        )
        .unwrap();
        let err = build_initial(&inst, &mut StdRng::seed_from_u64(3)).unwrap_err();
        assert_eq!(
            err,
            AlwabpError::ConstructionFailed {
                attempts: MAX_CONSTRUCTION_ATTEMPTS
            }
        );
    }

    #[test]
    fn test_multi_start_not_worse_than_single() {
        let inst = Instance::new(
            vec![
                vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0],
                vec![2.0, 6.0, 5.0, 3.0, 5.0, 8.0],
                vec![9.0, 7.0, 9.0, 3.0, 2.0, 3.0],
            ],
            vec![(0, 2), (1, 2), (2, 4), (3, 5)],
        )
        .unwrap();
        let single = build_initial(&inst, &mut StdRng::seed_from_u64(11)).unwrap();
        let multi = build_initial_multi(&inst, 5, &mut StdRng::seed_from_u64(11)).unwrap();
        assert!(multi.objective() <= single.objective());
    }
}
