//! Variable Neighborhood Search execution engine.
//!
//! # Algorithm (Basic VNS)
//!
//! 1. Take the initial solution x as both current and best, set k = 1
//! 2. While no stopping criterion holds:
//!    a. **Shaking**: generate x' randomly at strength k around x
//!    b. **Local search**: descend from x' with the structure for k → x''
//!    c. **Move or not**: if f(x'') < f(best), set x = best = x'' and
//!    k = 1; otherwise k = k + 1
//!    d. If k > k_max, the neighborhoods are exhausted: stop, or reset
//!    k = 1 under [`ExhaustionPolicy::Restart`]
//! 3. Return the best solution found
//!
//! One iteration is one shake + local-search cycle. The iteration cap and
//! the deadline are both checked before each cycle starts.
//!
//! # Reference
//!
//! Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//! *Computers & Operations Research* 24(11), 1097-1100.

use std::fmt;
use std::time::Instant;

use rand::Rng;

use super::config::{ExhaustionPolicy, VnsConfig};
use super::types::VnsProblem;
use crate::search::IMPROVEMENT_EPSILON;

/// Why a VNS run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Every strength `1..=k_max` failed to improve in a row.
    Exhausted,
    /// `max_iterations` cycles were executed.
    IterationLimit,
    /// The wall-clock deadline passed.
    Deadline,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exhausted => "exhausted",
            Self::IterationLimit => "iteration limit",
            Self::Deadline => "deadline",
        })
    }
}

/// Result of a VNS run.
#[derive(Debug, Clone)]
pub struct VnsResult<S: Clone> {
    /// Best solution found.
    pub best: S,
    /// Cost of the best solution.
    pub best_cost: f64,
    /// Cost of the initial solution.
    pub initial_cost: f64,
    /// Shake + local-search cycles executed.
    pub iterations: usize,
    /// Number of accepted improvements.
    pub improvements: usize,
    /// Iteration at which the best solution was found (0 = initial).
    pub best_iteration: usize,
    /// Best cost after each iteration.
    pub cost_history: Vec<f64>,
    /// Why the run stopped.
    pub termination: Termination,
}

/// Variable Neighborhood Search runner.
pub struct VnsRunner;

impl VnsRunner {
    /// Executes Basic VNS from `initial`.
    ///
    /// All randomness is drawn from `rng`, so a seeded generator makes the
    /// run reproducible as long as `deadline` does not cut it short.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::rngs::StdRng;
    /// use rand::{Rng, SeedableRng};
    /// use u_alwabp::vns::{VnsConfig, VnsProblem, VnsRunner};
    ///
    /// struct Abs;
    /// impl VnsProblem for Abs {
    ///     type Solution = i64;
    ///     fn cost(&self, x: &i64) -> f64 { x.abs() as f64 }
    ///     fn shake<R: Rng>(&self, x: &i64, k: usize, rng: &mut R) -> i64 {
    ///         let r = k as i64;
    ///         x + rng.random_range(-r..=r)
    ///     }
    ///     fn local_search(&self, x: i64, _k: usize) -> i64 { x - x.signum() * x.abs().min(1) }
    /// }
    ///
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let result = VnsRunner::run(&Abs, 20, &VnsConfig::default(), &mut rng, None);
    /// assert!(result.best_cost <= 20.0);
    /// ```
    pub fn run<P: VnsProblem, R: Rng>(
        problem: &P,
        initial: P::Solution,
        config: &VnsConfig,
        rng: &mut R,
        deadline: Option<Instant>,
    ) -> VnsResult<P::Solution> {
        let k_max = config.k_max.max(1);

        let initial_cost = problem.cost(&initial);
        let mut current = initial;
        let mut best_cost = initial_cost;
        let mut best_iteration = 0;
        let mut improvements = 0;

        let mut cost_history = Vec::with_capacity(config.max_iterations.min(4096));
        let mut iteration = 0;
        let mut k = 1;

        let termination = loop {
            if iteration >= config.max_iterations {
                break Termination::IterationLimit;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break Termination::Deadline;
            }

            let shaken = problem.shake(&current, k, rng);
            let candidate = problem.local_search(shaken, k);
            let candidate_cost = problem.cost(&candidate);
            iteration += 1;

            if candidate_cost < best_cost - IMPROVEMENT_EPSILON {
                tracing::trace!(iteration, k, from = best_cost, to = candidate_cost, "improved");
                current = candidate;
                best_cost = candidate_cost;
                best_iteration = iteration;
                improvements += 1;
                k = 1;
            } else {
                k += 1;
                tracing::trace!(iteration, k, "no improvement, next neighborhood");
                if k > k_max {
                    match config.on_exhaustion {
                        ExhaustionPolicy::Stop => {
                            cost_history.push(best_cost);
                            break Termination::Exhausted;
                        }
                        ExhaustionPolicy::Restart => k = 1,
                    }
                }
            }

            cost_history.push(best_cost);
        };

        tracing::debug!(
            iterations = iteration,
            improvements,
            initial_cost,
            best_cost,
            %termination,
            "vns finished"
        );

        VnsResult {
            best: current,
            best_cost,
            initial_cost,
            iterations: iteration,
            improvements,
            best_iteration,
            cost_history,
            termination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vns::{VnsConfig, VnsProblem};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    // ---- Discretized quadratic: f(x) = (x - 10)^2, min at x = 10 ----

    struct DiscreteQuadratic;

    fn quadratic(x: i32) -> f64 {
        let d = x as f64 - 10.0;
        d * d
    }

    impl VnsProblem for DiscreteQuadratic {
        type Solution = i32;

        fn cost(&self, &x: &i32) -> f64 {
            quadratic(x)
        }

        fn shake<R: Rng>(&self, &x: &i32, k: usize, rng: &mut R) -> i32 {
            let radius = k as i32 * 2;
            x + rng.random_range(-radius..=radius)
        }

        fn local_search(&self, x: i32, _k: usize) -> i32 {
            // Hill-climbing toward 10
            let mut current = x;
            loop {
                if quadratic(current - 1) < quadratic(current) {
                    current -= 1;
                } else if quadratic(current + 1) < quadratic(current) {
                    current += 1;
                } else {
                    break;
                }
            }
            current
        }
    }

    // ---- A problem that never improves ----

    struct Flat;

    impl VnsProblem for Flat {
        type Solution = u8;

        fn cost(&self, _: &u8) -> f64 {
            1.0
        }

        fn shake<R: Rng>(&self, &x: &u8, _k: usize, _rng: &mut R) -> u8 {
            x
        }

        fn local_search(&self, x: u8, _k: usize) -> u8 {
            x
        }
    }

    #[test]
    fn test_vns_quadratic_finds_optimum() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = VnsConfig::default().with_max_iterations(50);

        let result = VnsRunner::run(&DiscreteQuadratic, -40, &config, &mut rng, None);

        assert_eq!(result.best, 10, "expected optimum at x=10, got {}", result.best);
        assert!(result.best_cost < 1e-10);
        assert_eq!(result.initial_cost, 2500.0);
        assert_eq!(result.improvements, 1);
        assert_eq!(result.best_iteration, 1);
        assert_eq!(result.termination, Termination::Exhausted);
    }

    #[test]
    fn test_vns_cost_history_non_increasing() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = VnsConfig::default()
            .with_max_iterations(30)
            .with_exhaustion_policy(ExhaustionPolicy::Restart);

        let result = VnsRunner::run(&DiscreteQuadratic, 37, &config, &mut rng, None);

        assert_eq!(result.cost_history.len(), result.iterations);
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0] + 1e-10,
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_exhaustion_after_k_max_failures() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = VnsConfig::default().with_k_max(3);

        let result = VnsRunner::run(&Flat, 0, &config, &mut rng, None);

        assert_eq!(result.termination, Termination::Exhausted);
        assert_eq!(result.iterations, 3);
        assert_eq!(result.improvements, 0);
        assert_eq!(result.best_iteration, 0);
    }

    #[test]
    fn test_restart_runs_to_iteration_cap() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = VnsConfig::default()
            .with_max_iterations(25)
            .with_exhaustion_policy(ExhaustionPolicy::Restart);

        let result = VnsRunner::run(&Flat, 0, &config, &mut rng, None);

        assert_eq!(result.termination, Termination::IterationLimit);
        assert_eq!(result.iterations, 25);
    }

    #[test]
    fn test_past_deadline_returns_initial() {
        let mut rng = StdRng::seed_from_u64(0);
        let deadline = Instant::now()
            .checked_sub(Duration::from_millis(1))
            .unwrap_or_else(Instant::now);

        let result = VnsRunner::run(
            &DiscreteQuadratic,
            -3,
            &VnsConfig::default(),
            &mut rng,
            Some(deadline),
        );

        assert_eq!(result.termination, Termination::Deadline);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best, -3);
        assert_eq!(result.best_cost, result.initial_cost);
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = VnsConfig::default()
            .with_max_iterations(40)
            .with_exhaustion_policy(ExhaustionPolicy::Restart);
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let r = VnsRunner::run(&DiscreteQuadratic, 90, &config, &mut rng, None);
            (r.best, r.iterations, r.cost_history)
        };
        assert_eq!(run(7), run(7));
    }
}
