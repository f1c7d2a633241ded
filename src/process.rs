//! Process lifecycle model.
//!
//! A `ProcessRecord` carries the immutable workload description of one
//! simulated process (arrival time plus the original CPU and I/O burst
//! durations) next to the mutable run-time state the engine drives through
//! the lifecycle below.
//!
//! ## Lifecycle
//! ```text
//! NotArrived -> Ready -> Running -> BlockedOnIo -> Ready -> ... -> Completed
//! ```
//!
//! ## Invariants
//! - Original burst durations are never mutated; slicing policies decrement
//!   the separate `remaining` counter, which is refreshed from the original
//!   duration on every burst transition.
//! - `cpu_cursor` is monotone; the process is Completed exactly when the
//!   cursor has walked past the final CPU burst.

use crate::clock::Tick;

/// Index of a process in the workload, stable for the whole run.
pub type ProcId = usize;

/// Lifecycle state of a simulated process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ProcState {
    NotArrived,
    Ready,
    Running,
    BlockedOnIo,
    Completed,
}

/// Outcome of finishing the current CPU burst.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstOutcome {
    /// The process entered I/O and re-enters the ready queue at `until`.
    Blocked { until: Tick },
    /// The final CPU burst finished; the process is Completed.
    Finished,
}

/// One simulated process: immutable burst description plus mutable run state.
#[derive(Clone, Debug)]
pub struct ProcessRecord {
    arrival: Tick,
    cpu_bursts: Vec<Tick>,
    io_bursts: Vec<Tick>,
    cpu_cursor: usize,
    io_cursor: usize,
    state: ProcState,
    io_ready_at: Tick,
    remaining: Tick,
    completion: Option<Tick>,
}

impl ProcessRecord {
    /// Build a fresh record in `NotArrived` state.
    ///
    /// `cpu_bursts` must be non-empty with strictly positive durations;
    /// `io_bursts` holds the I/O duration after each non-final CPU burst
    /// (a trailing extra entry is tolerated and ignored).
    pub fn new(arrival: Tick, cpu_bursts: Vec<Tick>, io_bursts: Vec<Tick>) -> Self {
        debug_assert!(!cpu_bursts.is_empty());
        debug_assert!(cpu_bursts.iter().all(|&b| b > 0));
        debug_assert!(io_bursts.iter().all(|&b| b > 0));
        let remaining = cpu_bursts.first().copied().unwrap_or(0);
        Self {
            arrival,
            cpu_bursts,
            io_bursts,
            cpu_cursor: 0,
            io_cursor: 0,
            state: ProcState::NotArrived,
            io_ready_at: 0,
            remaining,
            completion: None,
        }
    }

    pub fn arrival(&self) -> Tick {
        self.arrival
    }

    pub fn state(&self) -> ProcState {
        self.state
    }

    /// Remaining ticks of the current CPU burst.
    pub fn remaining(&self) -> Tick {
        self.remaining
    }

    /// Index of the current CPU burst.
    pub fn burst_index(&self) -> usize {
        self.cpu_cursor
    }

    /// Original (unmutated) duration of the current CPU burst.
    ///
    /// # Panics
    /// Panics if the process has already completed.
    pub fn current_burst(&self) -> Tick {
        self.cpu_bursts[self.cpu_cursor]
    }

    /// Tick at which a blocked process re-enters the ready queue.
    /// Only meaningful while the state is `BlockedOnIo`.
    pub fn io_ready_at(&self) -> Tick {
        self.io_ready_at
    }

    /// Completion tick, once the final burst has finished.
    pub fn completion(&self) -> Option<Tick> {
        self.completion
    }

    pub fn is_completed(&self) -> bool {
        self.state == ProcState::Completed
    }

    /// Sum of the original burst durations. Derived from the immutable
    /// description only, so it stays correct after any amount of slicing.
    pub fn total_cpu(&self) -> Tick {
        self.cpu_bursts.iter().sum()
    }

    /// Admit a newly arrived process to the ready queue.
    pub(crate) fn admit(&mut self) {
        debug_assert_eq!(self.state, ProcState::NotArrived);
        self.state = ProcState::Ready;
    }

    /// Return from I/O to the ready queue.
    pub(crate) fn return_from_io(&mut self) {
        debug_assert_eq!(self.state, ProcState::BlockedOnIo);
        self.state = ProcState::Ready;
    }

    /// Begin a dispatch slice.
    pub(crate) fn begin_slice(&mut self) {
        debug_assert_eq!(self.state, ProcState::Ready);
        self.state = ProcState::Running;
    }

    /// Consume `ticks` of the current burst while running.
    pub(crate) fn consume(&mut self, ticks: Tick) {
        debug_assert_eq!(self.state, ProcState::Running);
        debug_assert!(ticks >= 1 && ticks <= self.remaining);
        self.remaining -= ticks;
    }

    /// End a slice with the burst unfinished; the process is ready again.
    pub(crate) fn yield_back(&mut self) {
        debug_assert_eq!(self.state, ProcState::Running);
        debug_assert!(self.remaining > 0);
        self.state = ProcState::Ready;
    }

    /// Finish the current burst at `now`: block on the next I/O burst, or
    /// complete if this was the final CPU burst. Refreshes `remaining` from
    /// the next burst's original duration.
    pub(crate) fn complete_burst(&mut self, now: Tick) -> BurstOutcome {
        debug_assert_eq!(self.state, ProcState::Running);
        debug_assert_eq!(self.remaining, 0);

        self.cpu_cursor += 1;
        if self.cpu_cursor < self.cpu_bursts.len() {
            // A record missing an interior I/O burst re-enters the ready
            // queue at the same tick.
            let io = self.io_bursts.get(self.io_cursor).copied().unwrap_or(0);
            self.io_cursor += 1;
            self.state = ProcState::BlockedOnIo;
            self.io_ready_at = now + io;
            self.remaining = self.cpu_bursts[self.cpu_cursor];
            BurstOutcome::Blocked {
                until: self.io_ready_at,
            }
        } else {
            self.state = ProcState::Completed;
            self.completion = Some(now);
            BurstOutcome::Finished
        }
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: ProcState) {
        self.state = state;
    }
}
