//! Exhaustive, lazy enumeration of feasible moves.
//!
//! Each iterator walks its move family in a fixed order, evaluates one
//! candidate at a time against the borrowed assignment and silently drops
//! rejected ones. Nothing is materialized up front; calling
//! [`Neighborhood::moves`](super::Neighborhood::moves) again restarts the
//! walk from the beginning.

use crate::instance::Instance;
use crate::solution::{Assignment, Move};

/// A feasible move together with the objective it would produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// The move.
    pub mv: Move,
    /// Bottleneck time after applying `mv`.
    pub objective: f64,
}

/// Single-task moves, task by task, stations in line order within each
/// task's precedence window.
#[derive(Debug, Clone)]
pub struct TaskShiftMoves<'a> {
    instance: &'a Instance,
    assignment: &'a Assignment,
    task: usize,
    station: usize,
    hi: usize,
}

impl<'a> TaskShiftMoves<'a> {
    pub(crate) fn new(instance: &'a Instance, assignment: &'a Assignment) -> Self {
        let (station, hi) = assignment.precedence_window(instance, 0);
        Self {
            instance,
            assignment,
            task: 0,
            station,
            hi,
        }
    }
}

impl Iterator for TaskShiftMoves<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        let n = self.instance.task_count();
        while self.task < n {
            while self.station <= self.hi {
                let to = self.station;
                self.station += 1;
                let mv = Move::ShiftTask {
                    task: self.task,
                    to,
                };
                if let Ok(objective) = self.assignment.evaluate_move(self.instance, mv) {
                    return Some(Candidate { mv, objective });
                }
            }
            self.task += 1;
            if self.task < n {
                let (lo, hi) = self.assignment.precedence_window(self.instance, self.task);
                self.station = lo;
                self.hi = hi;
            }
        }
        None
    }
}

/// Task pairs `(first, second)` with `first < second` in different
/// stations, lexicographic order.
#[derive(Debug, Clone)]
pub struct TaskSwapMoves<'a> {
    instance: &'a Instance,
    assignment: &'a Assignment,
    first: usize,
    second: usize,
}

impl<'a> TaskSwapMoves<'a> {
    pub(crate) fn new(instance: &'a Instance, assignment: &'a Assignment) -> Self {
        Self {
            instance,
            assignment,
            first: 0,
            second: 1,
        }
    }
}

impl Iterator for TaskSwapMoves<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        let n = self.instance.task_count();
        while self.first + 1 < n {
            while self.second < n {
                let mv = Move::SwapTasks {
                    first: self.first,
                    second: self.second,
                };
                self.second += 1;
                if let Ok(objective) = self.assignment.evaluate_move(self.instance, mv) {
                    return Some(Candidate { mv, objective });
                }
            }
            self.first += 1;
            self.second = self.first + 1;
        }
        None
    }
}

/// Station pairs `(first, second)` with `first < second`, lexicographic
/// order.
#[derive(Debug, Clone)]
pub struct WorkerSwapMoves<'a> {
    instance: &'a Instance,
    assignment: &'a Assignment,
    first: usize,
    second: usize,
}

impl<'a> WorkerSwapMoves<'a> {
    pub(crate) fn new(instance: &'a Instance, assignment: &'a Assignment) -> Self {
        Self {
            instance,
            assignment,
            first: 0,
            second: 1,
        }
    }
}

impl Iterator for WorkerSwapMoves<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        let m = self.instance.station_count();
        while self.first + 1 < m {
            while self.second < m {
                let mv = Move::SwapWorkers {
                    first: self.first,
                    second: self.second,
                };
                self.second += 1;
                if let Ok(objective) = self.assignment.evaluate_move(self.instance, mv) {
                    return Some(Candidate { mv, objective });
                }
            }
            self.first += 1;
            self.second = self.first + 1;
        }
        None
    }
}

/// Lazy move sequence of one [`Neighborhood`](super::Neighborhood).
#[derive(Debug, Clone)]
pub enum NeighborhoodMoves<'a> {
    /// See [`TaskShiftMoves`].
    TaskShift(TaskShiftMoves<'a>),
    /// See [`TaskSwapMoves`].
    TaskSwap(TaskSwapMoves<'a>),
    /// See [`WorkerSwapMoves`].
    WorkerSwap(WorkerSwapMoves<'a>),
}

impl Iterator for NeighborhoodMoves<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        match self {
            NeighborhoodMoves::TaskShift(it) => it.next(),
            NeighborhoodMoves::TaskSwap(it) => it.next(),
            NeighborhoodMoves::WorkerSwap(it) => it.next(),
        }
    }
}
