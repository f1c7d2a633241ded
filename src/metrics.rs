//! Per-process and aggregate timing metrics.
//!
//! All figures derive from the immutable burst description and the recorded
//! completion tick; nothing here reads the counters policies decrement, so
//! quantum-based slicing cannot skew the totals.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::clock::Tick;
use crate::process::{ProcId, ProcessRecord};
use crate::trace::TraceLog;

/// Timing figures for one completed process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub pid: ProcId,
    pub arrival: Tick,
    /// Sum of the original burst durations.
    pub total_cpu: Tick,
    pub completion: Tick,
    /// `completion - arrival`.
    pub turnaround: Tick,
    /// `turnaround - total_cpu`. Signed so an accounting defect shows up as
    /// a negative value instead of wrapping.
    pub waiting: i64,
}

/// The outcome of one run: the full trace plus derived metrics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub processes: Vec<ProcessMetrics>,
    pub trace: TraceLog,
}

impl RunReport {
    /// Derive metrics for a finished process list.
    pub(crate) fn new(procs: &[ProcessRecord], trace: TraceLog) -> Self {
        let processes = procs
            .iter()
            .enumerate()
            .map(|(pid, proc)| {
                let completion = proc
                    .completion()
                    .expect("report built only after every process completed");
                let total_cpu = proc.total_cpu();
                let turnaround = completion - proc.arrival();
                ProcessMetrics {
                    pid,
                    arrival: proc.arrival(),
                    total_cpu,
                    completion,
                    turnaround,
                    waiting: turnaround as i64 - total_cpu as i64,
                }
            })
            .collect();
        Self { processes, trace }
    }

    /// Arithmetic mean of turnaround times; 0 for an empty workload.
    pub fn avg_turnaround(&self) -> f64 {
        mean(self.processes.iter().map(|m| m.turnaround as f64))
    }

    /// Arithmetic mean of waiting times; 0 for an empty workload.
    pub fn avg_waiting(&self) -> f64 {
        mean(self.processes.iter().map(|m| m.waiting as f64))
    }

    /// Fixed-width metrics table, one row per process.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<6} {:>8} {:>10} {:>11} {:>11} {:>8}",
            "proc", "arrival", "total-cpu", "completion", "turnaround", "waiting"
        );
        for m in &self.processes {
            let _ = writeln!(
                out,
                "{:<6} {:>8} {:>10} {:>11} {:>11} {:>8}",
                format!("P{}", m.pid + 1),
                m.arrival,
                m.total_cpu,
                m.completion,
                m.turnaround,
                m.waiting
            );
        }
        out
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0u32;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}
