//! Neighborhood structures.
//!
//! Three move families in a fixed escalating order:
//!
//! 1. [`Neighborhood::TaskShift`]: move one task to another station inside
//!    the window left by its predecessors and successors.
//! 2. [`Neighborhood::TaskSwap`]: exchange the stations of two tasks.
//! 3. [`Neighborhood::WorkerSwap`]: exchange the workers of two stations.
//!
//! Every family offers an exhaustive lazy enumeration
//! ([`Neighborhood::moves`]) for local search and a seeded single-move
//! sample ([`Neighborhood::sample`]) for shaking. Neither mutates the
//! assignment it is given.

mod enumerate;
mod sample;

use std::fmt;

use rand::Rng;

use crate::instance::Instance;
use crate::solution::{Assignment, Move};

pub use enumerate::{Candidate, NeighborhoodMoves, TaskShiftMoves, TaskSwapMoves, WorkerSwapMoves};

/// A move family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Neighborhood {
    /// Single-task reassignment.
    TaskShift,
    /// Two-task station exchange.
    TaskSwap,
    /// Two-station worker exchange.
    WorkerSwap,
}

impl Neighborhood {
    /// All families in escalating order.
    pub const ALL: [Neighborhood; 3] = [
        Neighborhood::TaskShift,
        Neighborhood::TaskSwap,
        Neighborhood::WorkerSwap,
    ];

    /// Family matching shaking strength `k` (1-based).
    ///
    /// Strengths beyond the number of families map to the last one, so
    /// `k_max` may exceed three; `k = 0` is treated as 1.
    ///
    /// ```
    /// use u_alwabp::neighborhood::Neighborhood;
    ///
    /// assert_eq!(Neighborhood::for_strength(1), Neighborhood::TaskShift);
    /// assert_eq!(Neighborhood::for_strength(3), Neighborhood::WorkerSwap);
    /// assert_eq!(Neighborhood::for_strength(7), Neighborhood::WorkerSwap);
    /// ```
    pub fn for_strength(k: usize) -> Self {
        let index = k.saturating_sub(1).min(Self::ALL.len() - 1);
        Self::ALL[index]
    }

    /// Lazily enumerates every feasible move of this family around
    /// `assignment`, each paired with its resulting objective.
    pub fn moves<'a>(
        self,
        instance: &'a Instance,
        assignment: &'a Assignment,
    ) -> NeighborhoodMoves<'a> {
        match self {
            Neighborhood::TaskShift => {
                NeighborhoodMoves::TaskShift(TaskShiftMoves::new(instance, assignment))
            }
            Neighborhood::TaskSwap => {
                NeighborhoodMoves::TaskSwap(TaskSwapMoves::new(instance, assignment))
            }
            Neighborhood::WorkerSwap => {
                NeighborhoodMoves::WorkerSwap(WorkerSwapMoves::new(instance, assignment))
            }
        }
    }

    /// Draws one feasible move at random, trying up to `attempts` times.
    ///
    /// Returns `None` if every draw was infeasible or the family is empty
    /// for this instance (e.g. worker swap on a one-station line).
    pub fn sample<R: Rng>(
        self,
        instance: &Instance,
        assignment: &Assignment,
        rng: &mut R,
        attempts: usize,
    ) -> Option<Move> {
        match self {
            Neighborhood::TaskShift => sample::sample_task_shift(instance, assignment, rng, attempts),
            Neighborhood::TaskSwap => sample::sample_task_swap(instance, assignment, rng, attempts),
            Neighborhood::WorkerSwap => {
                sample::sample_worker_swap(instance, assignment, rng, attempts)
            }
        }
    }

    /// Short name for logs.
    pub fn name(self) -> &'static str {
        match self {
            Neighborhood::TaskShift => "task-shift",
            Neighborhood::TaskSwap => "task-swap",
            Neighborhood::WorkerSwap => "worker-swap",
        }
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::INFEASIBLE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn instance() -> Instance {
        Instance::new(
            vec![
                vec![3.0, 1.0, 4.0, 1.0, 5.0],
                vec![2.0, 6.0, INFEASIBLE, 3.0, 5.0],
                vec![9.0, 7.0, 9.0, 3.0, 2.0],
            ],
            vec![(0, 2), (1, 2), (2, 4)],
        )
        .unwrap()
    }

    #[test]
    fn test_strength_mapping() {
        assert_eq!(Neighborhood::for_strength(0), Neighborhood::TaskShift);
        assert_eq!(Neighborhood::for_strength(2), Neighborhood::TaskSwap);
    }

    #[test]
    fn test_samples_are_feasible_and_enumerated() {
        let inst = instance();
        let a = Assignment::from_parts(&inst, vec![0, 0, 0, 1, 2], vec![0, 1, 2]).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for nb in Neighborhood::ALL {
            let all: Vec<Move> = nb.moves(&inst, &a).map(|c| c.mv).collect();
            for _ in 0..50 {
                if let Some(mv) = nb.sample(&inst, &a, &mut rng, 10) {
                    assert!(a.evaluate_move(&inst, mv).is_ok(), "{nb}: {mv}");
                    assert!(all.contains(&mv), "{nb}: {mv} not enumerated");
                }
            }
        }
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let inst = instance();
        let a = Assignment::from_parts(&inst, vec![0, 0, 0, 1, 2], vec![0, 1, 2]).unwrap();
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10)
                .map(|_| Neighborhood::TaskSwap.sample(&inst, &a, &mut rng, 10))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(9), draw(9));
    }

    #[test]
    fn test_empty_family_samples_none() {
        let inst = Instance::new(vec![vec![1.0, 1.0]], vec![]).unwrap();
        let a = Assignment::from_parts(&inst, vec![0, 0], vec![0]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(Neighborhood::WorkerSwap.sample(&inst, &a, &mut rng, 10).is_none());
        assert!(Neighborhood::TaskShift.sample(&inst, &a, &mut rng, 10).is_none());
    }
}
