//! Seeded single-move sampling used by shaking.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::instance::Instance;
use crate::solution::{Assignment, Move};

pub(super) fn sample_task_shift<R: Rng>(
    instance: &Instance,
    assignment: &Assignment,
    rng: &mut R,
    attempts: usize,
) -> Option<Move> {
    let n = instance.task_count();
    for _ in 0..attempts {
        let task = rng.random_range(0..n);
        let current = assignment.station_of(task);
        let (lo, hi) = assignment.precedence_window(instance, task);
        let stations: Vec<usize> = (lo..=hi)
            .filter(|&s| s != current)
            .filter(|&s| instance.is_capable(assignment.station_worker()[s], task))
            .collect();
        if let Some(&to) = stations.choose(rng) {
            return Some(Move::ShiftTask { task, to });
        }
    }
    None
}

pub(super) fn sample_task_swap<R: Rng>(
    instance: &Instance,
    assignment: &Assignment,
    rng: &mut R,
    attempts: usize,
) -> Option<Move> {
    let n = instance.task_count();
    if n < 2 {
        return None;
    }
    for _ in 0..attempts {
        let first = rng.random_range(0..n);
        let second = rng.random_range(0..n - 1);
        let second = if second >= first { second + 1 } else { second };
        let mv = Move::SwapTasks {
            first: first.min(second),
            second: first.max(second),
        };
        if assignment.evaluate_move(instance, mv).is_ok() {
            return Some(mv);
        }
    }
    None
}

pub(super) fn sample_worker_swap<R: Rng>(
    instance: &Instance,
    assignment: &Assignment,
    rng: &mut R,
    attempts: usize,
) -> Option<Move> {
    let m = instance.station_count();
    if m < 2 {
        return None;
    }
    for _ in 0..attempts {
        let first = rng.random_range(0..m);
        let second = rng.random_range(0..m - 1);
        let second = if second >= first { second + 1 } else { second };
        let mv = Move::SwapWorkers {
            first: first.min(second),
            second: first.max(second),
        };
        if assignment.evaluate_move(instance, mv).is_ok() {
            return Some(mv);
        }
    }
    None
}
