//! Variable Neighborhood Search (VNS).
//!
//! A single-solution metaheuristic that systematically changes
//! neighborhood structures during the search. At each step, a random
//! perturbation (shaking) at strength k is followed by local search. If
//! the best solution improves, the search resets to k = 1; otherwise it
//! moves on to the next (stronger) k until `k_max` is exceeded.
//!
//! [`VnsRunner`] is generic over [`VnsProblem`]; [`LineBalancing`] plugs
//! the assembly line model into it.
//!
//! # References
//!
//! - Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//!   *Computers & Operations Research* 24(11), 1097-1100.
//! - Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//!   Principles and applications", *European Journal of Operational Research* 130(3), 449-467.

mod config;
mod line_balancing;
mod runner;
mod types;

pub use config::{DescentMode, ExhaustionPolicy, VnsConfig};
pub use line_balancing::{LineBalancing, VND_SEQUENCE};
pub use runner::{Termination, VnsResult, VnsRunner};
pub use types::VnsProblem;
