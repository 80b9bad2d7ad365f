//! [`VnsProblem`] adapter for assembly line worker assignment.

use rand::Rng;

use super::config::{DescentMode, VnsConfig};
use super::types::VnsProblem;
use crate::instance::Instance;
use crate::neighborhood::Neighborhood;
use crate::search::{self, LocalSearchPolicy};
use crate::solution::Assignment;

/// Neighborhood order used by [`DescentMode::Vnd`].
pub const VND_SEQUENCE: [Neighborhood; 2] = [Neighborhood::TaskShift, Neighborhood::WorkerSwap];

/// Line balancing over a borrowed [`Instance`], minimizing cycle time.
///
/// Strength `k` shakes with `k` moves from [`Neighborhood::for_strength`]
/// and descends with the same family, or with [`VND_SEQUENCE`] when the
/// descent mode is [`DescentMode::Vnd`].
#[derive(Debug, Clone, Copy)]
pub struct LineBalancing<'a> {
    instance: &'a Instance,
    policy: LocalSearchPolicy,
    descent: DescentMode,
    shake_attempts: usize,
}

impl<'a> LineBalancing<'a> {
    /// Creates the adapter, taking the search options from `config`.
    pub fn new(instance: &'a Instance, config: &VnsConfig) -> Self {
        Self {
            instance,
            policy: config.local_search,
            descent: config.descent,
            shake_attempts: config.shake_attempts.max(1),
        }
    }

    /// The instance being balanced.
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }
}

impl VnsProblem for LineBalancing<'_> {
    type Solution = Assignment;

    fn cost(&self, solution: &Assignment) -> f64 {
        solution.objective()
    }

    fn shake<R: Rng>(&self, solution: &Assignment, k: usize, rng: &mut R) -> Assignment {
        search::shake(self.instance, solution, k, rng, self.shake_attempts)
    }

    fn local_search(&self, solution: Assignment, k: usize) -> Assignment {
        match self.descent {
            DescentMode::Matching => search::local_search(
                self.instance,
                solution,
                Neighborhood::for_strength(k),
                self.policy,
            ),
            DescentMode::Vnd => search::variable_neighborhood_descent(
                self.instance,
                solution,
                &VND_SEQUENCE,
                self.policy,
            ),
        }
    }
}
