//! Workload description parsing.
//!
//! One record per line:
//! ```text
//! <arrival> <cpu_1> <io_1> <cpu_2> <io_2> ... -1
//! ```
//! Values after the arrival time alternate CPU burst, I/O burst, terminated
//! by the `-1` sentinel. An odd count of alternating values leaves a
//! trailing CPU burst with no following I/O burst, which is valid for the
//! final burst.
//!
//! # Parsing Assumptions
//! - A line missing the sentinel is accepted: whatever alternating values
//!   were read before end-of-line are kept. Tokens after the sentinel are
//!   ignored.
//! - A trailing I/O burst (one entry per CPU burst instead of one fewer) is
//!   kept but never consumed.
//! - Blank lines are skipped.
//!
//! Tightened relative to the permissive baseline: non-numeric tokens,
//! negative arrivals, non-positive burst durations, and records with no CPU
//! bursts at all are reported as `WorkloadError` naming the offending line
//! rather than silently kept.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::Tick;
use crate::process::ProcessRecord;

/// Errors from workload parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct WorkloadError {
    /// 1-based line number of the offending record.
    pub line: usize,
    pub kind: WorkloadErrorKind,
}

/// Classification of workload parse failures.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum WorkloadErrorKind {
    /// Token is not an integer.
    BadToken { token: String },
    /// Arrival time is negative.
    NegativeArrival { value: i64 },
    /// A burst duration is zero or negative (and not the sentinel).
    NonPositiveBurst { value: i64 },
    /// The record holds no CPU bursts.
    NoCpuBursts,
}

impl fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WorkloadErrorKind::BadToken { token } => {
                write!(f, "workload line {}: unparseable token {token:?}", self.line)
            }
            WorkloadErrorKind::NegativeArrival { value } => {
                write!(f, "workload line {}: negative arrival time {value}", self.line)
            }
            WorkloadErrorKind::NonPositiveBurst { value } => {
                write!(
                    f,
                    "workload line {}: non-positive burst duration {value}",
                    self.line
                )
            }
            WorkloadErrorKind::NoCpuBursts => {
                write!(f, "workload line {}: no CPU bursts before end of line", self.line)
            }
        }
    }
}

impl std::error::Error for WorkloadError {}

/// Immutable description of one process in the workload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub arrival: Tick,
    pub cpu_bursts: Vec<Tick>,
    #[serde(default)]
    pub io_bursts: Vec<Tick>,
}

/// A loaded workload: the ordered process descriptions a run starts from.
///
/// The workload itself is never mutated by a run; the engine builds a fresh
/// set of `ProcessRecord`s from it each time, so repeated runs of the same
/// workload are identical.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    records: Vec<ProcessSpec>,
}

impl Workload {
    /// Build a workload from already-validated process descriptions.
    pub fn new(records: Vec<ProcessSpec>) -> Self {
        debug_assert!(records.iter().all(|r| !r.cpu_bursts.is_empty()));
        Self { records }
    }

    /// Parse a workload description file.
    pub fn parse(input: &str) -> Result<Self, WorkloadError> {
        let mut records = Vec::new();
        for (idx, raw) in input.lines().enumerate() {
            let line = idx + 1;
            let mut tokens = raw.split_whitespace();
            let Some(first) = tokens.next() else {
                continue; // blank line
            };

            let arrival = parse_token(first, line)?;
            if arrival < 0 {
                return Err(WorkloadError {
                    line,
                    kind: WorkloadErrorKind::NegativeArrival { value: arrival },
                });
            }

            let mut cpu_bursts = Vec::new();
            let mut io_bursts = Vec::new();
            let mut is_cpu = true;
            for token in tokens {
                let value = parse_token(token, line)?;
                if value == -1 {
                    break;
                }
                if value <= 0 {
                    return Err(WorkloadError {
                        line,
                        kind: WorkloadErrorKind::NonPositiveBurst { value },
                    });
                }
                if is_cpu {
                    cpu_bursts.push(value as Tick);
                } else {
                    io_bursts.push(value as Tick);
                }
                is_cpu = !is_cpu;
            }

            if cpu_bursts.is_empty() {
                return Err(WorkloadError {
                    line,
                    kind: WorkloadErrorKind::NoCpuBursts,
                });
            }

            records.push(ProcessSpec {
                arrival: arrival as Tick,
                cpu_bursts,
                io_bursts,
            });
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[ProcessSpec] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fresh per-run process state; one record per description, in order.
    pub(crate) fn build_processes(&self) -> Vec<ProcessRecord> {
        self.records
            .iter()
            .map(|spec| {
                ProcessRecord::new(spec.arrival, spec.cpu_bursts.clone(), spec.io_bursts.clone())
            })
            .collect()
    }
}

fn parse_token(token: &str, line: usize) -> Result<i64, WorkloadError> {
    token.parse::<i64>().map_err(|_| WorkloadError {
        line,
        kind: WorkloadErrorKind::BadToken {
            token: token.to_string(),
        },
    })
}
