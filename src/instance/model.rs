//! Immutable ALWABP instance.

use std::collections::VecDeque;

use crate::error::AlwabpError;

/// Processing-time sentinel for a worker that cannot perform a task.
pub const INFEASIBLE: f64 = f64::INFINITY;

/// A validated, read-only ALWABP instance.
///
/// Holds the worker × task processing-time table and the precedence DAG.
/// The line has one station per worker, so `station_count() == worker_count()`.
///
/// # Examples
///
/// ```
/// use u_alwabp::instance::{Instance, INFEASIBLE};
///
/// // 3 tasks in a chain, 2 workers. times[worker][task]
/// let instance = Instance::new(
///     vec![vec![2.0, 3.0, 4.0], vec![5.0, INFEASIBLE, 1.0]],
///     vec![(0, 1), (1, 2)],
/// )
/// .unwrap();
/// assert_eq!(instance.task_count(), 3);
/// assert_eq!(instance.station_count(), 2);
/// assert!(!instance.is_capable(1, 1));
/// assert_eq!(instance.topological_order(), &[0, 1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    times: Vec<Vec<f64>>,
    precedences: Vec<(usize, usize)>,
    predecessors: Vec<Vec<usize>>,
    successors: Vec<Vec<usize>>,
    topological_order: Vec<usize>,
}

impl Instance {
    /// Builds an instance from `times[worker][task]` and 0-based precedence
    /// pairs `(before, after)`.
    ///
    /// Duplicate precedence pairs are collapsed. A time of positive
    /// infinity ([`INFEASIBLE`]) marks an infeasible worker/task pair.
    ///
    /// # Errors
    ///
    /// - [`AlwabpError::InvalidInstance`] for an empty or ragged table,
    ///   a negative or NaN time, an out-of-range or self-referencing
    ///   precedence pair.
    /// - [`AlwabpError::UnassignableTask`] if some task is infeasible for
    ///   every worker.
    /// - [`AlwabpError::CyclicPrecedence`] if the precedence graph has a cycle.
    pub fn new(
        times: Vec<Vec<f64>>,
        precedences: Vec<(usize, usize)>,
    ) -> Result<Self, AlwabpError> {
        let worker_count = times.len();
        if worker_count == 0 {
            return Err(AlwabpError::InvalidInstance("instance has no workers".into()));
        }
        let task_count = times[0].len();
        if task_count == 0 {
            return Err(AlwabpError::InvalidInstance("instance has no tasks".into()));
        }

        for (w, row) in times.iter().enumerate() {
            if row.len() != task_count {
                return Err(AlwabpError::InvalidInstance(format!(
                    "worker {} has {} times, expected {task_count}",
                    w + 1,
                    row.len()
                )));
            }
            if let Some(i) = row.iter().position(|t| t.is_nan()) {
                return Err(AlwabpError::InvalidInstance(format!(
                    "time of worker {} on task {} is NaN",
                    w + 1,
                    i + 1
                )));
            }
            if let Some(i) = row.iter().position(|t| *t < 0.0) {
                return Err(AlwabpError::InvalidInstance(format!(
                    "time of worker {} on task {} must be non-negative",
                    w + 1,
                    i + 1
                )));
            }
        }

        for task in 0..task_count {
            if times.iter().all(|row| !row[task].is_finite()) {
                return Err(AlwabpError::UnassignableTask { task });
            }
        }

        let mut predecessors = vec![Vec::new(); task_count];
        let mut successors = vec![Vec::new(); task_count];
        let mut unique = Vec::with_capacity(precedences.len());
        for (before, after) in precedences {
            if before >= task_count || after >= task_count {
                return Err(AlwabpError::InvalidInstance(format!(
                    "precedence ({}, {}) references an unknown task",
                    before + 1,
                    after + 1
                )));
            }
            if before == after {
                return Err(AlwabpError::InvalidInstance(format!(
                    "task {} cannot precede itself",
                    before + 1
                )));
            }
            if successors[before].contains(&after) {
                continue;
            }
            successors[before].push(after);
            predecessors[after].push(before);
            unique.push((before, after));
        }

        let topological_order = kahn_order(&predecessors, &successors)?;

        Ok(Self {
            times,
            precedences: unique,
            predecessors,
            successors,
            topological_order,
        })
    }

    /// Builds an instance from rows laid out per task (`rows[task][worker]`),
    /// the layout of the instance text files.
    pub fn from_task_rows(
        rows: Vec<Vec<f64>>,
        precedences: Vec<(usize, usize)>,
    ) -> Result<Self, AlwabpError> {
        let worker_count = rows.first().map_or(0, Vec::len);
        if let Some(i) = rows.iter().position(|r| r.len() != worker_count) {
            return Err(AlwabpError::InvalidInstance(format!(
                "task {} has {} times, expected {worker_count}",
                i + 1,
                rows[i].len()
            )));
        }
        let times = (0..worker_count)
            .map(|w| rows.iter().map(|r| r[w]).collect())
            .collect();
        Self::new(times, precedences)
    }

    /// Number of tasks.
    #[inline]
    pub fn task_count(&self) -> usize {
        self.topological_order.len()
    }

    /// Number of workers.
    #[inline]
    pub fn worker_count(&self) -> usize {
        self.times.len()
    }

    /// Number of stations (one per worker).
    #[inline]
    pub fn station_count(&self) -> usize {
        self.times.len()
    }

    /// Processing time of `task` by `worker`; [`INFEASIBLE`] if incapable.
    #[inline]
    pub fn time(&self, worker: usize, task: usize) -> f64 {
        self.times[worker][task]
    }

    /// Whether `worker` can perform `task`.
    #[inline]
    pub fn is_capable(&self, worker: usize, task: usize) -> bool {
        self.times[worker][task].is_finite()
    }

    /// Direct predecessors of `task`.
    #[inline]
    pub fn predecessors(&self, task: usize) -> &[usize] {
        &self.predecessors[task]
    }

    /// Direct successors of `task`.
    #[inline]
    pub fn successors(&self, task: usize) -> &[usize] {
        &self.successors[task]
    }

    /// Deduplicated precedence pairs `(before, after)`.
    pub fn precedences(&self) -> &[(usize, usize)] {
        &self.precedences
    }

    /// Fixed topological order of the tasks (Kahn's algorithm, FIFO,
    /// lowest index first among the initial sources).
    pub fn topological_order(&self) -> &[usize] {
        &self.topological_order
    }

    /// Fastest processing time of `task` over all capable workers.
    pub fn min_time(&self, task: usize) -> f64 {
        self.times
            .iter()
            .map(|row| row[task])
            .fold(INFEASIBLE, f64::min)
    }

    /// A simple lower bound on the bottleneck time: the larger of the
    /// slowest single task (at its fastest worker) and the total fastest
    /// work spread evenly across stations.
    pub fn lower_bound(&self) -> f64 {
        let mut total = 0.0;
        let mut largest: f64 = 0.0;
        for task in 0..self.task_count() {
            let t = self.min_time(task);
            total += t;
            largest = largest.max(t);
        }
        largest.max(total / self.station_count() as f64)
    }
}

fn kahn_order(
    predecessors: &[Vec<usize>],
    successors: &[Vec<usize>],
) -> Result<Vec<usize>, AlwabpError> {
    let n = predecessors.len();
    let mut in_degree: Vec<usize> = predecessors.iter().map(Vec::len).collect();
    let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(i) = queue.pop_front() {
        order.push(i);
        for &j in &successors[i] {
            in_degree[j] -= 1;
            if in_degree[j] == 0 {
                queue.push_back(j);
            }
        }
    }

    if order.len() != n {
        return Err(AlwabpError::CyclicPrecedence {
            remaining: n - order.len(),
        });
    }
    Ok(order)
}
