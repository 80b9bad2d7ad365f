//! Local modifications of an [`Assignment`](super::Assignment).

use std::fmt;

/// A candidate modification.
///
/// Moves are plain data; feasibility is decided by
/// [`Assignment::evaluate_move`](super::Assignment::evaluate_move) and
/// [`Assignment::apply_move`](super::Assignment::apply_move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Move {
    /// Move `task` to station `to`.
    ShiftTask {
        /// Task index.
        task: usize,
        /// Destination station.
        to: usize,
    },
    /// Exchange the stations of two tasks.
    SwapTasks {
        /// First task.
        first: usize,
        /// Second task.
        second: usize,
    },
    /// Exchange the workers of two stations. Task placement is unchanged.
    SwapWorkers {
        /// First station.
        first: usize,
        /// Second station.
        second: usize,
    },
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::ShiftTask { task, to } => write!(f, "shift(task {} -> station {})", task + 1, to + 1),
            Move::SwapTasks { first, second } => {
                write!(f, "swap(task {} <-> task {})", first + 1, second + 1)
            }
            Move::SwapWorkers { first, second } => {
                write!(f, "swap-workers(station {} <-> station {})", first + 1, second + 1)
            }
        }
    }
}
