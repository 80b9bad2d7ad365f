//! Descent procedures.

use crate::instance::Instance;
use crate::neighborhood::{Candidate, Neighborhood};
use crate::solution::Assignment;

/// Minimum objective decrease that counts as an improvement.
pub const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Which improving move local search commits at each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocalSearchPolicy {
    /// Scan the whole neighborhood and take the move with the lowest
    /// objective (earliest in enumeration order on ties).
    #[default]
    BestImprovement,
    /// Take the first strictly improving move found.
    FirstImprovement,
}

/// Repeatedly applies improving moves from `neighborhood` until none is
/// left, returning a local optimum for that neighborhood.
///
/// Deterministic: no randomness, fixed enumeration order. The objective
/// never increases.
///
/// # Examples
///
/// ```
/// use u_alwabp::instance::Instance;
/// use u_alwabp::neighborhood::Neighborhood;
/// use u_alwabp::search::{local_search, LocalSearchPolicy};
/// use u_alwabp::solution::Assignment;
///
/// let instance = Instance::new(
///     vec![vec![2.0, 3.0, 4.0], vec![5.0, 3.0, 1.0]],
///     vec![(0, 1), (1, 2)],
/// )
/// .unwrap();
/// let start = Assignment::from_parts(&instance, vec![0, 0, 0], vec![0, 1]).unwrap();
/// assert_eq!(start.objective(), 9.0);
///
/// let best = local_search(&instance, start, Neighborhood::TaskShift, LocalSearchPolicy::BestImprovement);
/// assert_eq!(best.objective(), 4.0);
/// ```
pub fn local_search(
    instance: &Instance,
    start: Assignment,
    neighborhood: Neighborhood,
    policy: LocalSearchPolicy,
) -> Assignment {
    let mut current = start;
    let mut steps = 0usize;

    loop {
        let threshold = current.objective() - IMPROVEMENT_EPSILON;
        let mut chosen: Option<Candidate> = None;

        for candidate in neighborhood.moves(instance, &current) {
            let bar = chosen.map_or(threshold, |c| c.objective);
            if candidate.objective < bar {
                chosen = Some(candidate);
                if policy == LocalSearchPolicy::FirstImprovement {
                    break;
                }
            }
        }

        let Some(candidate) = chosen else {
            break;
        };
        if let Err(reason) = current.apply_move(instance, candidate.mv) {
            tracing::warn!(%reason, mv = %candidate.mv, "enumerated move rejected on apply");
            break;
        }
        steps += 1;
    }

    tracing::trace!(
        neighborhood = %neighborhood,
        steps,
        objective = current.objective(),
        "local search converged"
    );
    current
}

/// Variable neighborhood descent: local search over `neighborhoods` in
/// order, restarting from the first one after every improvement and
/// stopping once a full pass improves nothing.
pub fn variable_neighborhood_descent(
    instance: &Instance,
    start: Assignment,
    neighborhoods: &[Neighborhood],
    policy: LocalSearchPolicy,
) -> Assignment {
    let mut current = start;
    let mut l = 0;
    while l < neighborhoods.len() {
        let before = current.objective();
        current = local_search(instance, current, neighborhoods[l], policy);
        if current.objective() < before - IMPROVEMENT_EPSILON {
            l = 0;
        } else {
            l += 1;
        }
    }
    current
}
