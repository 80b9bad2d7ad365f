//! Assembly Line Worker Assignment and Balancing (ALWABP) by Variable
//! Neighborhood Search.
//!
//! Tasks with precedence constraints are spread over a serial line of
//! stations, and every station gets exactly one worker from a
//! heterogeneous pool. Processing times depend on the worker, and some
//! worker-task pairs are infeasible. The goal is the smallest cycle time:
//! the largest station load.
//!
//! - **[`instance`]**: immutable problem data and its text format.
//! - **[`solution`]**: feasible assignments, validated moves and
//!   randomized construction.
//! - **[`neighborhood`]**: task-shift, task-swap and worker-swap move
//!   families, as lazy enumerations and as seeded samples.
//! - **[`search`]**: local search, variable neighborhood descent and
//!   shaking.
//! - **[`vns`]**: the generic VNS controller and its line balancing
//!   adapter.
//! - **[`replication`]**: multi-seed runs of one instance under a shared
//!   wall-clock budget.
//! - **[`report`]**: solution text and summary rows.
//! - **[`batch`]**: many instances at once, in parallel with the
//!   `parallel` feature.
//!
//! # Quick start
//!
//! ```
//! use u_alwabp::instance::Instance;
//! use u_alwabp::replication::{ReplicationConfig, ReplicationManager};
//! use u_alwabp::report::{InstanceReport, SolutionReport};
//!
//! let instance: Instance = "3\n2 5\n3 3\n4 1\n1 2\n2 3\n-1 -1\n".parse().unwrap();
//! let config = ReplicationConfig::default().with_seeds(vec![0, 1, 7]);
//! let summary = ReplicationManager::new(config).run("chain", &instance).unwrap();
//!
//! assert!(summary.best_objective <= 9.0);
//! println!("{}", SolutionReport::new(summary.best_assignment()));
//! println!("{}", InstanceReport::new(&summary, Some(4.0)));
//! ```
//!
//! The library emits `tracing` events and installs no subscriber.

pub mod batch;
pub mod error;
pub mod instance;
pub mod neighborhood;
pub mod replication;
pub mod report;
pub mod search;
pub mod solution;
pub mod vns;

pub use error::{AlwabpError, MoveRejected};
