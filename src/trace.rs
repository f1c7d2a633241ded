//! Execution trace for replay, testing, and console output.
//!
//! Every dispatch decision and idle skip lands here in order, so two runs
//! can be compared structurally and a run can be rendered line by line.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::Tick;
use crate::process::ProcId;

/// One engine decision. Process ids render 1-based (`P1`, `P2`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceEvent {
    /// A process ran `ticks` ticks of CPU burst `burst` starting at `at`.
    Dispatch {
        pid: ProcId,
        burst: usize,
        at: Tick,
        ticks: Tick,
    },
    /// No process was ready; the clock jumped from `from` to `to`.
    IdleSkip { from: Tick, to: Tick },
    /// A process entered I/O; it becomes ready again at `until`.
    Blocked { pid: ProcId, until: Tick },
    /// A process finished its final CPU burst at `at`.
    Completed { pid: ProcId, at: Tick },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatch {
                pid,
                burst,
                at,
                ticks,
            } => write!(
                f,
                "t={at}: run P{} burst {} for {ticks} ticks",
                pid + 1,
                burst + 1
            ),
            Self::IdleSkip { from, to } => {
                write!(f, "t={from}: idle, advancing to t={to}")
            }
            Self::Blocked { pid, until } => {
                write!(f, "P{} blocked on I/O until t={until}", pid + 1)
            }
            Self::Completed { pid, at } => write!(f, "t={at}: P{} completed", pid + 1),
        }
    }
}

/// Append-only event log of one run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceLog {
    events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, ev: TraceEvent) {
        self.events.push(ev);
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
