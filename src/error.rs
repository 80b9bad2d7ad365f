//! Error types.
//!
//! [`AlwabpError`] covers instance-level failures that abort the search for
//! one instance before any replication starts. [`MoveRejected`] is the local
//! verdict of a feasibility check on a single move; neighborhoods and local
//! search consume it and simply skip the candidate.

use std::fmt;

/// Fatal error for one problem instance.
#[derive(Debug, Clone, PartialEq)]
pub enum AlwabpError {
    /// The precedence graph contains a cycle. `remaining` tasks could not be
    /// placed in any topological order.
    CyclicPrecedence {
        /// Number of tasks left over when Kahn's algorithm stalled.
        remaining: usize,
    },
    /// A task cannot be processed by any worker.
    UnassignableTask {
        /// 0-based task index.
        task: usize,
    },
    /// Structurally malformed instance data.
    InvalidInstance(String),
    /// The randomized builder found no feasible assignment.
    ConstructionFailed {
        /// Number of worker permutations tried.
        attempts: usize,
    },
    /// Configuration rejected by `validate()`.
    InvalidConfig(String),
    /// Instance text could not be parsed.
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
}

impl fmt::Display for AlwabpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlwabpError::CyclicPrecedence { remaining } => write!(
                f,
                "precedence graph contains a cycle ({remaining} tasks unordered)"
            ),
            AlwabpError::UnassignableTask { task } => {
                write!(f, "task {} cannot be performed by any worker", task + 1)
            }
            AlwabpError::InvalidInstance(msg) => write!(f, "invalid instance: {msg}"),
            AlwabpError::ConstructionFailed { attempts } => write!(
                f,
                "no feasible initial assignment found after {attempts} attempts"
            ),
            AlwabpError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            AlwabpError::Parse { line, message } => {
                write!(f, "parse error at line {line}: {message}")
            }
        }
    }
}

impl std::error::Error for AlwabpError {}

/// Reason a candidate move was refused.
///
/// Rejections are never repaired: the assignment is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveRejected {
    /// Task `after` would sit in an earlier station than its predecessor
    /// `before`.
    PrecedenceViolated {
        /// Predecessor task.
        before: usize,
        /// Successor task.
        after: usize,
    },
    /// `worker` would be asked to perform `task`, which it cannot do.
    IncapableWorker {
        /// Worker index.
        worker: usize,
        /// Task index.
        task: usize,
    },
    /// Two stations would share `worker`.
    DuplicateWorker {
        /// Worker index.
        worker: usize,
    },
    /// The cached completion time of `station` differs from a
    /// recomputation. Only reported by `Assignment::validate`.
    StaleStationTime {
        /// Station index.
        station: usize,
    },
    /// The move leaves the assignment unchanged.
    NoOp,
    /// A task or station index is out of range.
    OutOfRange,
}

impl fmt::Display for MoveRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRejected::PrecedenceViolated { before, after } => write!(
                f,
                "task {} would precede its predecessor {}",
                after + 1,
                before + 1
            ),
            MoveRejected::IncapableWorker { worker, task } => write!(
                f,
                "worker {} cannot perform task {}",
                worker + 1,
                task + 1
            ),
            MoveRejected::DuplicateWorker { worker } => {
                write!(f, "worker {} is assigned to two stations", worker + 1)
            }
            MoveRejected::StaleStationTime { station } => {
                write!(f, "cached time of station {} is stale", station + 1)
            }
            MoveRejected::NoOp => write!(f, "move does not change the assignment"),
            MoveRejected::OutOfRange => write!(f, "move references an unknown task or station"),
        }
    }
}

impl std::error::Error for MoveRejected {}
