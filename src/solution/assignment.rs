//! Candidate assignment of tasks and workers to stations.

use super::moves::Move;
use crate::error::MoveRejected;
use crate::instance::Instance;

/// A feasible assignment of tasks to stations and workers to stations.
///
/// Station completion times and the bottleneck objective are cached, so
/// [`objective`](Self::objective) is O(1). A move rebuilds the times of
/// the stations it touches by summing their tasks in index order, the
/// same order [`from_parts`](Self::from_parts) uses, so cached values are
/// bit-identical to a recomputation.
///
/// Every `Assignment` reachable through the public API satisfies:
///
/// - every task sits in exactly one station;
/// - for every precedence pair `(p, t)`, `station(p) <= station(t)`;
/// - no two stations share a worker;
/// - no task sits at a station whose worker cannot perform it.
///
/// With the `serde` feature an `Assignment` serializes directly but does
/// not deserialize: read an [`AssignmentParts`] and rebuild it with
/// [`AssignmentParts::into_assignment`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Assignment {
    task_station: Vec<usize>,
    station_worker: Vec<usize>,
    station_times: Vec<f64>,
    objective: f64,
}

impl Assignment {
    /// Builds an assignment from explicit maps after checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`MoveRejected`].
    ///
    /// # Examples
    ///
    /// ```
    /// use u_alwabp::instance::Instance;
    /// use u_alwabp::solution::Assignment;
    ///
    /// let instance = Instance::new(
    ///     vec![vec![2.0, 3.0, 4.0], vec![5.0, 3.0, 1.0]],
    ///     vec![(0, 1), (1, 2)],
    /// )
    /// .unwrap();
    /// let a = Assignment::from_parts(&instance, vec![0, 1, 1], vec![0, 1]).unwrap();
    /// assert_eq!(a.objective(), 4.0);
    /// assert!(Assignment::from_parts(&instance, vec![1, 0, 1], vec![0, 1]).is_err());
    /// ```
    pub fn from_parts(
        instance: &Instance,
        task_station: Vec<usize>,
        station_worker: Vec<usize>,
    ) -> Result<Self, MoveRejected> {
        let stations = instance.station_count();
        if task_station.len() != instance.task_count()
            || station_worker.len() != stations
            || task_station.iter().any(|&s| s >= stations)
            || station_worker.iter().any(|&w| w >= instance.worker_count())
        {
            return Err(MoveRejected::OutOfRange);
        }

        let mut seen = vec![false; instance.worker_count()];
        for &w in &station_worker {
            if std::mem::replace(&mut seen[w], true) {
                return Err(MoveRejected::DuplicateWorker { worker: w });
            }
        }

        for &(before, after) in instance.precedences() {
            if task_station[before] > task_station[after] {
                return Err(MoveRejected::PrecedenceViolated { before, after });
            }
        }

        let mut station_times = vec![0.0; stations];
        for (task, &s) in task_station.iter().enumerate() {
            let worker = station_worker[s];
            if !instance.is_capable(worker, task) {
                return Err(MoveRejected::IncapableWorker { worker, task });
            }
            station_times[s] += instance.time(worker, task);
        }

        let objective = station_times.iter().copied().fold(0.0, f64::max);
        Ok(Self {
            task_station,
            station_worker,
            station_times,
            objective,
        })
    }

    /// The two maps without the cached times.
    pub fn to_parts(&self) -> AssignmentParts {
        AssignmentParts {
            task_station: self.task_station.clone(),
            station_worker: self.station_worker.clone(),
        }
    }

    /// Station of every task, indexed by task.
    #[inline]
    pub fn task_station(&self) -> &[usize] {
        &self.task_station
    }

    /// Worker of every station, indexed by station.
    #[inline]
    pub fn station_worker(&self) -> &[usize] {
        &self.station_worker
    }

    /// Station holding `task`.
    #[inline]
    pub fn station_of(&self, task: usize) -> usize {
        self.task_station[task]
    }

    /// Completion time of `station`.
    #[inline]
    pub fn station_time(&self, station: usize) -> f64 {
        self.station_times[station]
    }

    /// Completion times of all stations.
    #[inline]
    pub fn station_times(&self) -> &[f64] {
        &self.station_times
    }

    /// Bottleneck (maximum station) time.
    #[inline]
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Lowest-indexed station whose time equals the objective.
    pub fn bottleneck_station(&self) -> usize {
        self.station_times
            .iter()
            .position(|&t| t >= self.objective)
            .unwrap_or(0)
    }

    /// Tasks placed at `station`, in increasing task index.
    pub fn tasks_at(&self, station: usize) -> impl Iterator<Item = usize> + '_ {
        self.task_station
            .iter()
            .enumerate()
            .filter(move |&(_, &s)| s == station)
            .map(|(task, _)| task)
    }

    /// Range of stations `task` may occupy given where its direct
    /// predecessors and successors currently sit (inclusive bounds).
    pub fn precedence_window(&self, instance: &Instance, task: usize) -> (usize, usize) {
        let lo = instance
            .predecessors(task)
            .iter()
            .map(|&p| self.task_station[p])
            .max()
            .unwrap_or(0);
        let hi = instance
            .successors(task)
            .iter()
            .map(|&s| self.task_station[s])
            .min()
            .unwrap_or(instance.station_count() - 1);
        (lo, hi)
    }

    /// Re-checks every invariant and the cached times against a full
    /// recomputation.
    ///
    /// # Errors
    ///
    /// The first violated invariant, or
    /// [`MoveRejected::StaleStationTime`] if a cached time differs from the
    /// recomputed one.
    pub fn validate(&self, instance: &Instance) -> Result<(), MoveRejected> {
        let fresh = Self::from_parts(
            instance,
            self.task_station.clone(),
            self.station_worker.clone(),
        )?;
        let stale = fresh
            .station_times
            .iter()
            .zip(&self.station_times)
            .position(|(a, b)| a.to_bits() != b.to_bits());
        if let Some(station) = stale {
            return Err(MoveRejected::StaleStationTime { station });
        }
        if fresh.objective.to_bits() != self.objective.to_bits() {
            return Err(MoveRejected::StaleStationTime {
                station: fresh.bottleneck_station(),
            });
        }
        Ok(())
    }

    /// Objective the assignment would have after `mv`, without mutating it.
    ///
    /// # Errors
    ///
    /// Returns why the move is infeasible.
    pub fn evaluate_move(&self, instance: &Instance, mv: Move) -> Result<f64, MoveRejected> {
        let delta = self.delta(instance, mv)?;
        Ok(self.objective_with(&delta.times))
    }

    /// Applies `mv` in place if every invariant still holds afterwards.
    ///
    /// On rejection the assignment is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_alwabp::error::MoveRejected;
    /// use u_alwabp::instance::Instance;
    /// use u_alwabp::solution::{Assignment, Move};
    ///
    /// let instance = Instance::new(
    ///     vec![vec![2.0, 3.0, 4.0], vec![5.0, 3.0, 1.0]],
    ///     vec![(0, 1), (1, 2)],
    /// )
    /// .unwrap();
    /// let mut a = Assignment::from_parts(&instance, vec![0, 0, 1], vec![0, 1]).unwrap();
    /// assert_eq!(a.objective(), 5.0);
    ///
    /// // move task 2 into station 2 next to task 3
    /// a.apply_move(&instance, Move::ShiftTask { task: 1, to: 1 }).unwrap();
    /// assert_eq!(a.objective(), 4.0);
    ///
    /// // pulling task 3 ahead of task 2 is refused
    /// let err = a.apply_move(&instance, Move::ShiftTask { task: 2, to: 0 });
    /// assert_eq!(err, Err(MoveRejected::PrecedenceViolated { before: 1, after: 2 }));
    /// assert_eq!(a.objective(), 4.0);
    /// ```
    pub fn apply_move(&mut self, instance: &Instance, mv: Move) -> Result<(), MoveRejected> {
        let delta = self.delta(instance, mv)?;
        match mv {
            Move::ShiftTask { task, to } => self.task_station[task] = to,
            Move::SwapTasks { first, second } => {
                self.task_station.swap(first, second);
            }
            Move::SwapWorkers { first, second } => self.station_worker.swap(first, second),
        }
        for &(station, time) in &delta.times {
            self.station_times[station] = time;
        }
        self.objective = self.station_times.iter().copied().fold(0.0, f64::max);
        Ok(())
    }

    /// Returns a copy with `mv` applied, leaving `self` untouched.
    pub fn with_move(&self, instance: &Instance, mv: Move) -> Result<Self, MoveRejected> {
        let mut next = self.clone();
        next.apply_move(instance, mv)?;
        Ok(next)
    }

    fn objective_with(&self, overrides: &[(usize, f64)]) -> f64 {
        self.station_times
            .iter()
            .enumerate()
            .map(|(s, &t)| {
                overrides
                    .iter()
                    .find(|&&(o, _)| o == s)
                    .map_or(t, |&(_, nt)| nt)
            })
            .fold(0.0, f64::max)
    }

    fn delta(&self, instance: &Instance, mv: Move) -> Result<Delta, MoveRejected> {
        match mv {
            Move::ShiftTask { task, to } => self.shift_delta(instance, task, to),
            Move::SwapTasks { first, second } => self.swap_tasks_delta(instance, first, second),
            Move::SwapWorkers { first, second } => {
                self.swap_workers_delta(instance, first, second)
            }
        }
    }

    fn shift_delta(&self, instance: &Instance, task: usize, to: usize) -> Result<Delta, MoveRejected> {
        if task >= self.task_station.len() || to >= self.station_worker.len() {
            return Err(MoveRejected::OutOfRange);
        }
        let from = self.task_station[task];
        if from == to {
            return Err(MoveRejected::NoOp);
        }
        for &p in instance.predecessors(task) {
            if self.task_station[p] > to {
                return Err(MoveRejected::PrecedenceViolated { before: p, after: task });
            }
        }
        for &s in instance.successors(task) {
            if to > self.task_station[s] {
                return Err(MoveRejected::PrecedenceViolated { before: task, after: s });
            }
        }
        let worker = self.station_worker[to];
        if !instance.is_capable(worker, task) {
            return Err(MoveRejected::IncapableWorker { worker, task });
        }

        let placement = |t: usize| if t == task { to } else { self.task_station[t] };
        Ok(Delta {
            times: [
                (from, self.load_with(instance, from, self.station_worker[from], placement)),
                (to, self.load_with(instance, to, worker, placement)),
            ]
            .to_vec(),
        })
    }

    fn swap_tasks_delta(
        &self,
        instance: &Instance,
        first: usize,
        second: usize,
    ) -> Result<Delta, MoveRejected> {
        let n = self.task_station.len();
        if first >= n || second >= n {
            return Err(MoveRejected::OutOfRange);
        }
        let (sa, sb) = (self.task_station[first], self.task_station[second]);
        if first == second || sa == sb {
            return Err(MoveRejected::NoOp);
        }

        let station_after = |t: usize| {
            if t == first {
                sb
            } else if t == second {
                sa
            } else {
                self.task_station[t]
            }
        };
        for task in [first, second] {
            let at = station_after(task);
            for &p in instance.predecessors(task) {
                if station_after(p) > at {
                    return Err(MoveRejected::PrecedenceViolated { before: p, after: task });
                }
            }
            for &s in instance.successors(task) {
                if at > station_after(s) {
                    return Err(MoveRejected::PrecedenceViolated { before: task, after: s });
                }
            }
        }

        let (wa, wb) = (self.station_worker[sa], self.station_worker[sb]);
        if !instance.is_capable(wb, first) {
            return Err(MoveRejected::IncapableWorker { worker: wb, task: first });
        }
        if !instance.is_capable(wa, second) {
            return Err(MoveRejected::IncapableWorker { worker: wa, task: second });
        }

        Ok(Delta {
            times: [
                (sa, self.load_with(instance, sa, wa, station_after)),
                (sb, self.load_with(instance, sb, wb, station_after)),
            ]
            .to_vec(),
        })
    }

    fn swap_workers_delta(
        &self,
        instance: &Instance,
        first: usize,
        second: usize,
    ) -> Result<Delta, MoveRejected> {
        let m = self.station_worker.len();
        if first >= m || second >= m {
            return Err(MoveRejected::OutOfRange);
        }
        if first == second {
            return Err(MoveRejected::NoOp);
        }
        let (w1, w2) = (self.station_worker[first], self.station_worker[second]);
        for (task, &s) in self.task_station.iter().enumerate() {
            if s == first && !instance.is_capable(w2, task) {
                return Err(MoveRejected::IncapableWorker { worker: w2, task });
            }
            if s == second && !instance.is_capable(w1, task) {
                return Err(MoveRejected::IncapableWorker { worker: w1, task });
            }
        }
        let placement = |t: usize| self.task_station[t];
        Ok(Delta {
            times: [
                (first, self.load_with(instance, first, w2, placement)),
                (second, self.load_with(instance, second, w1, placement)),
            ]
            .to_vec(),
        })
    }

    /// Load of `station` staffed by `worker` when each task `t` sits at
    /// `placement(t)`. Summed in task index order, like `from_parts`.
    fn load_with(
        &self,
        instance: &Instance,
        station: usize,
        worker: usize,
        placement: impl Fn(usize) -> usize,
    ) -> f64 {
        (0..self.task_station.len())
            .filter(|&t| placement(t) == station)
            .fold(0.0, |load, t| load + instance.time(worker, t))
    }
}

/// New completion times of the stations a move touches.
struct Delta {
    times: Vec<(usize, f64)>,
}

/// Unchecked task and worker maps of an [`Assignment`].
///
/// This is the deserializable form; station times are recomputed and every
/// invariant is checked when it is turned back into an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentParts {
    /// Station of every task, indexed by task.
    pub task_station: Vec<usize>,
    /// Worker of every station, indexed by station.
    pub station_worker: Vec<usize>,
}

impl AssignmentParts {
    /// Validates the maps against `instance` through
    /// [`Assignment::from_parts`].
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`MoveRejected`].
    pub fn into_assignment(self, instance: &Instance) -> Result<Assignment, MoveRejected> {
        Assignment::from_parts(instance, self.task_station, self.station_worker)
    }
}
