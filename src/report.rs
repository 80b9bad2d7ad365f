//! Text renderings of search results.
//!
//! Everything here is 1-based, matching the instance file format. Gap
//! values against a reference optimum are computed only in this module.

use std::fmt;

use crate::replication::{ReplicationRecord, ReplicationSummary};
use crate::solution::Assignment;

/// Solution file body: the cycle time, then one line per station.
///
/// ```
/// use u_alwabp::instance::Instance;
/// use u_alwabp::report::SolutionReport;
/// use u_alwabp::solution::Assignment;
///
/// let instance = Instance::new(
///     vec![vec![2.0, 3.0, 4.0], vec![5.0, 3.0, 1.0]],
///     vec![(0, 1), (1, 2)],
/// )
/// .unwrap();
/// let a = Assignment::from_parts(&instance, vec![0, 1, 1], vec![0, 1]).unwrap();
/// assert_eq!(
///     SolutionReport::new(&a).to_string(),
///     "4.000000\nStation 1: Worker 1 -> Tasks: 1\nStation 2: Worker 2 -> Tasks: 2 3"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SolutionReport<'a> {
    assignment: &'a Assignment,
}

impl<'a> SolutionReport<'a> {
    /// Wraps `assignment` for display.
    pub fn new(assignment: &'a Assignment) -> Self {
        Self { assignment }
    }
}

impl fmt::Display for SolutionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.assignment.objective())?;
        for (station, &worker) in self.assignment.station_worker().iter().enumerate() {
            write!(f, "\nStation {}: Worker {} -> Tasks:", station + 1, worker + 1)?;
            for task in self.assignment.tasks_at(station) {
                write!(f, " {}", task + 1)?;
            }
        }
        Ok(())
    }
}

/// One row of the per-instance summary table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceReport {
    /// Instance name.
    pub instance: String,
    /// Seed of the winning replication.
    pub best_seed: u64,
    /// SI.
    pub initial_objective: f64,
    /// SF.
    pub best_objective: f64,
    /// SO: externally supplied optimum or upper bound.
    pub reference: Option<f64>,
    /// Wall-clock time of all replications, in seconds.
    pub total_time_s: f64,
    /// `(SI - SF) / SI * 100`, or 0 when SI is not positive.
    pub improvement_pct: f64,
    /// `(SF - SO) / SF * 100`, when a positive SO is known.
    pub gap_pct: Option<f64>,
}

impl InstanceReport {
    /// Column header matching the [`Display`](fmt::Display) output.
    pub const HEADER: &'static str =
        "Instance;Best_Seed;SI;SF;SO;Total_Time_s;Improvement_%;Gap_to_Optimal_%";

    /// Builds the row for `summary`, comparing against `reference` when given.
    pub fn new(summary: &ReplicationSummary, reference: Option<f64>) -> Self {
        let si = summary.initial_objective;
        let sf = summary.best_objective;
        let improvement_pct = if si > 0.0 { (si - sf) / si * 100.0 } else { 0.0 };
        let gap_pct = reference
            .filter(|&so| so > 0.0 && sf > 0.0)
            .map(|so| (sf - so) / sf * 100.0);

        Self {
            instance: summary.instance_name.clone(),
            best_seed: summary.best_seed,
            initial_objective: si,
            best_objective: sf,
            reference,
            total_time_s: summary.total_time.as_secs_f64(),
            improvement_pct,
            gap_pct,
        }
    }
}

struct OrNa<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for OrNa<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => v.fmt(f),
            None => f.write_str("NA"),
        }
    }
}

impl fmt::Display for InstanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{};{};{:.4};{:.2};{}",
            self.instance,
            self.best_seed,
            self.initial_objective,
            self.best_objective,
            OrNa(self.reference),
            self.total_time_s,
            self.improvement_pct,
            OrNa(self.gap_pct.map(|g| format!("{g:.2}"))),
        )
    }
}

/// One row of the per-replication table.
#[derive(Debug, Clone, Copy)]
pub struct ReplicationRow<'a> {
    instance: &'a str,
    record: &'a ReplicationRecord,
}

impl<'a> ReplicationRow<'a> {
    /// Column header matching the [`Display`](fmt::Display) output.
    pub const HEADER: &'static str = "Instance;Replication;Seed;SI;SF;Time_s";

    /// Row for `record`, labelled with the `instance` name.
    pub fn new(instance: &'a str, record: &'a ReplicationRecord) -> Self {
        Self { instance, record }
    }

    /// Rows for every replication in `summary`, in seed order.
    pub fn all(summary: &'a ReplicationSummary) -> impl Iterator<Item = ReplicationRow<'a>> + 'a {
        summary
            .replications
            .iter()
            .map(move |record| ReplicationRow::new(&summary.instance_name, record))
    }
}

impl fmt::Display for ReplicationRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{};{};{:.4}",
            self.instance,
            self.record.index + 1,
            self.record.seed,
            self.record.initial_objective,
            self.record.final_objective,
            self.record.elapsed.as_secs_f64(),
        )
    }
}
