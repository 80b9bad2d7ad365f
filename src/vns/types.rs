//! Core trait for Variable Neighborhood Search.

use rand::Rng;

/// Defines a Variable Neighborhood Search problem.
///
/// The runner owns the control loop (strength schedule, acceptance,
/// termination); the problem supplies evaluation, shaking and descent.
/// Strengths are 1-based: `k` runs from 1 to the configured `k_max`, and
/// larger values should perturb more.
///
/// # Minimization
///
/// VNS minimizes the cost function. For maximization, negate the cost.
///
/// # References
///
/// Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
/// *Computers & Operations Research* 24(11), 1097-1100.
pub trait VnsProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Computes the cost of a solution. Lower is better.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Generates a random neighbor at strength `k` (shaking).
    fn shake<R: Rng>(&self, solution: &Self::Solution, k: usize, rng: &mut R) -> Self::Solution;

    /// Descends from `solution` using the structure matching strength `k`.
    ///
    /// Must never return a solution costlier than its input.
    fn local_search(&self, solution: Self::Solution, k: usize) -> Self::Solution;
}
