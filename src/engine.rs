//! The shared discrete-event dispatcher.
//!
//! All five policies run through the same loop; they differ only in the
//! selection and slicing strategies supplied via [`SchedPolicy`]. Each
//! decision point is:
//!
//! 1. Admit arrivals (`arrival <= now`), then I/O returns
//!    (`io_ready_at <= now`), each in ascending process index.
//! 2. If the ready queue is empty but work remains, jump the clock to the
//!    next pending arrival or I/O completion. If no such event exists the
//!    run is stalled — a fatal error, never a silent exit or a spin.
//! 3. Otherwise dispatch exactly one process for the policy's slice,
//!    recording a trace event, and apply burst-completion or requeue rules.
//!
//! The whole simulation state (clock, ready queue, process list, trace)
//! lives in one value; nothing global leaks between runs.

use std::collections::VecDeque;
use std::fmt;

use crate::clock::{SimClock, Tick};
use crate::metrics::RunReport;
use crate::policy::{RequeueRule, SchedPolicy};
use crate::process::{BurstOutcome, ProcState, ProcessRecord};
use crate::trace::{TraceEvent, TraceLog};
use crate::workload::Workload;

/// Fatal simulation errors.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SimError {
    /// Incomplete processes remain, but no process is ready and no pending
    /// arrival or I/O completion can advance the clock.
    Stalled { now: Tick },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stalled { now } => write!(
                f,
                "simulation stalled at t={now}: incomplete processes but no pending event"
            ),
        }
    }
}

impl std::error::Error for SimError {}

/// One run's worth of simulation state.
pub struct Simulation {
    clock: SimClock,
    procs: Vec<ProcessRecord>,
    ready: VecDeque<usize>,
    trace: TraceLog,
    /// Processes not yet Completed.
    live: usize,
}

impl Simulation {
    /// Build fresh run state from a workload. The workload itself is left
    /// untouched, so a second `Simulation` replays identically.
    pub fn new(workload: &Workload) -> Self {
        let procs = workload.build_processes();
        let live = procs.len();
        Self {
            clock: SimClock::new(),
            procs,
            ready: VecDeque::new(),
            trace: TraceLog::default(),
            live,
        }
    }

    /// Drive the workload to completion under `policy`.
    pub fn run(mut self, policy: &dyn SchedPolicy) -> Result<RunReport, SimError> {
        while self.live > 0 {
            self.admit_due();
            if self.ready.is_empty() {
                let now = self.clock.now();
                let next = self
                    .next_event_tick()
                    .ok_or(SimError::Stalled { now })?;
                self.trace.push(TraceEvent::IdleSkip { from: now, to: next });
                self.clock.advance_to(next);
                continue;
            }
            self.dispatch(policy);
        }
        Ok(RunReport::new(&self.procs, self.trace))
    }

    /// Move every due process into the ready queue, arrivals first, then
    /// I/O returns, each pass in ascending process index.
    fn admit_due(&mut self) {
        let now = self.clock.now();
        for pid in 0..self.procs.len() {
            let proc = &mut self.procs[pid];
            if proc.state() == ProcState::NotArrived && proc.arrival() <= now {
                proc.admit();
                self.ready.push_back(pid);
            }
        }
        for pid in 0..self.procs.len() {
            let proc = &mut self.procs[pid];
            if proc.state() == ProcState::BlockedOnIo && proc.io_ready_at() <= now {
                proc.return_from_io();
                self.ready.push_back(pid);
            }
        }
    }

    /// Run one slice of the policy's chosen process.
    fn dispatch(&mut self, policy: &dyn SchedPolicy) {
        let pos = policy.select(&self.ready, &self.procs);
        let in_place = policy.requeue() == RequeueRule::InPlace;
        let pid = if in_place {
            self.ready[pos]
        } else {
            self.ready
                .remove(pos)
                .expect("policy selected a position inside the ready queue")
        };

        let start = self.clock.now();
        let burst = self.procs[pid].burst_index();
        let ticks = policy.slice(&self.procs[pid]);
        debug_assert!(ticks >= 1 && ticks <= self.procs[pid].remaining());

        self.procs[pid].begin_slice();
        self.clock.advance_by(ticks);
        self.procs[pid].consume(ticks);
        self.trace.push(TraceEvent::Dispatch {
            pid,
            burst,
            at: start,
            ticks,
        });

        let now = self.clock.now();
        if self.procs[pid].remaining() == 0 {
            if in_place {
                self.ready.retain(|&p| p != pid);
            }
            match self.procs[pid].complete_burst(now) {
                BurstOutcome::Blocked { until } => {
                    self.trace.push(TraceEvent::Blocked { pid, until });
                }
                BurstOutcome::Finished => {
                    self.live -= 1;
                    self.trace.push(TraceEvent::Completed { pid, at: now });
                }
            }
        } else {
            self.procs[pid].yield_back();
            match policy.requeue() {
                RequeueRule::InPlace => {} // still queued at its original position
                RequeueRule::Tail => self.ready.push_back(pid),
                RequeueRule::ReadmitThenTail => {
                    self.admit_due();
                    self.ready.push_back(pid);
                }
            }
        }
    }

    /// Earliest pending arrival or I/O completion strictly after `now`.
    fn next_event_tick(&self) -> Option<Tick> {
        let now = self.clock.now();
        let mut next: Option<Tick> = None;
        for proc in &self.procs {
            let candidate = match proc.state() {
                ProcState::NotArrived => Some(proc.arrival()),
                ProcState::BlockedOnIo => Some(proc.io_ready_at()),
                _ => None,
            };
            if let Some(t) = candidate {
                if t > now {
                    next = Some(next.map_or(t, |cur| cur.min(t)));
                }
            }
        }
        next
    }
}
