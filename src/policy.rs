//! The five scheduling policies.
//!
//! A policy supplies only selection and slicing; the event loop in
//! [`crate::engine`] is shared. Selection returns a *position* in the ready
//! queue, and every policy scans with a strict `<` so equal keys resolve to
//! the earliest-inserted process. That insertion-order tie-break is part of
//! the contract: given the same workload (and quantum), a policy always
//! produces the same schedule.

use std::collections::VecDeque;
use std::num::NonZeroU64;

use crate::clock::Tick;
use crate::process::{ProcId, ProcessRecord};

/// Disposition of a dispatched process whose burst is still unfinished
/// when its slice ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequeueRule {
    /// The process keeps its position in the ready queue while it runs and
    /// stays there (tick-granular preemption).
    InPlace,
    /// Re-append to the tail immediately; processes arriving during the
    /// slice are admitted at the next decision point, behind it.
    Tail,
    /// Admit arrivals and I/O returns once, then re-append to the tail, so
    /// a tied arrival is ordered ahead of the preempted process.
    ReadmitThenTail,
}

/// A scheduling policy: which ready process runs next, and for how long.
pub trait SchedPolicy {
    fn name(&self) -> &'static str;

    /// Position in `ready` of the process to dispatch. `ready` is non-empty
    /// and holds indices into `procs`.
    fn select(&self, ready: &VecDeque<ProcId>, procs: &[ProcessRecord]) -> usize;

    /// Ticks to execute before the next decision point. Always in
    /// `1..=proc.remaining()`.
    fn slice(&self, proc: &ProcessRecord) -> Tick;

    /// What happens to the process if its burst outlives the slice.
    fn requeue(&self) -> RequeueRule;
}

/// Position of the minimum key, scanning in queue order so the
/// earliest-inserted process wins ties.
fn position_min_by_key(
    ready: &VecDeque<ProcId>,
    procs: &[ProcessRecord],
    key: impl Fn(&ProcessRecord) -> Tick,
) -> usize {
    debug_assert!(!ready.is_empty());
    let mut best_pos = 0;
    let mut best_key = key(&procs[ready[0]]);
    for (pos, &pid) in ready.iter().enumerate().skip(1) {
        let k = key(&procs[pid]);
        if k < best_key {
            best_pos = pos;
            best_key = k;
        }
    }
    best_pos
}

/// First-come-first-served: head of the queue runs its whole burst.
pub struct Fifo;

impl SchedPolicy for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn select(&self, _ready: &VecDeque<ProcId>, _procs: &[ProcessRecord]) -> usize {
        0
    }

    fn slice(&self, proc: &ProcessRecord) -> Tick {
        proc.remaining()
    }

    fn requeue(&self) -> RequeueRule {
        // A full-burst slice never leaves the burst unfinished.
        RequeueRule::Tail
    }
}

/// Shortest job first, non-preemptive: smallest *original* duration of the
/// current burst wins; the burst then runs whole.
pub struct Sjf;

impl SchedPolicy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn select(&self, ready: &VecDeque<ProcId>, procs: &[ProcessRecord]) -> usize {
        position_min_by_key(ready, procs, |p| p.current_burst())
    }

    fn slice(&self, proc: &ProcessRecord) -> Tick {
        proc.remaining()
    }

    fn requeue(&self) -> RequeueRule {
        RequeueRule::Tail
    }
}

/// Shortest remaining time first: re-selected every tick over the mutable
/// remaining-time counters, preempting at tick granularity.
pub struct Srtf;

impl SchedPolicy for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn select(&self, ready: &VecDeque<ProcId>, procs: &[ProcessRecord]) -> usize {
        position_min_by_key(ready, procs, |p| p.remaining())
    }

    fn slice(&self, _proc: &ProcessRecord) -> Tick {
        1
    }

    fn requeue(&self) -> RequeueRule {
        RequeueRule::InPlace
    }
}

/// Fair-share rotation: head of the queue, one tick per dispatch, back to
/// the tail — every ready process gets an equal minimal slice before any
/// process gets a second one.
pub struct FairShare;

impl SchedPolicy for FairShare {
    fn name(&self) -> &'static str {
        "CFS"
    }

    fn select(&self, _ready: &VecDeque<ProcId>, _procs: &[ProcessRecord]) -> usize {
        0
    }

    fn slice(&self, _proc: &ProcessRecord) -> Tick {
        1
    }

    fn requeue(&self) -> RequeueRule {
        RequeueRule::Tail
    }
}

/// Round robin with a configurable quantum.
pub struct RoundRobin {
    quantum: NonZeroU64,
}

impl RoundRobin {
    pub fn new(quantum: NonZeroU64) -> Self {
        Self { quantum }
    }

    pub fn quantum(&self) -> NonZeroU64 {
        self.quantum
    }
}

impl SchedPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn select(&self, _ready: &VecDeque<ProcId>, _procs: &[ProcessRecord]) -> usize {
        0
    }

    fn slice(&self, proc: &ProcessRecord) -> Tick {
        proc.remaining().min(self.quantum.get())
    }

    fn requeue(&self) -> RequeueRule {
        RequeueRule::ReadmitThenTail
    }
}

/// Look up a policy by its command-line name.
///
/// `quantum` is consulted only for `RR`; `RR` without a quantum yields
/// `None`, as does an unknown name.
pub fn from_name(name: &str, quantum: Option<NonZeroU64>) -> Option<Box<dyn SchedPolicy>> {
    match name {
        "FIFO" => Some(Box::new(Fifo)),
        "SJF" => Some(Box::new(Sjf)),
        "SRTF" => Some(Box::new(Srtf)),
        "CFS" => Some(Box::new(FairShare)),
        "RR" => quantum.map(|q| Box::new(RoundRobin::new(q)) as Box<dyn SchedPolicy>),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_of(pids: &[ProcId]) -> VecDeque<ProcId> {
        pids.iter().copied().collect()
    }

    fn procs(bursts: &[&[Tick]]) -> Vec<ProcessRecord> {
        bursts
            .iter()
            .map(|b| ProcessRecord::new(0, b.to_vec(), vec![]))
            .collect()
    }

    #[test]
    fn sjf_picks_smallest_current_burst() {
        let procs = procs(&[&[5], &[2], &[4]]);
        let ready = ready_of(&[0, 1, 2]);
        assert_eq!(Sjf.select(&ready, &procs), 1);
    }

    #[test]
    fn sjf_tie_goes_to_first_inserted() {
        let procs = procs(&[&[3], &[3]]);
        // Insertion order 1 then 0: position 0 (pid 1) must win the tie.
        let ready = ready_of(&[1, 0]);
        assert_eq!(Sjf.select(&ready, &procs), 0);
    }

    #[test]
    fn srtf_compares_remaining_not_original() {
        let mut procs = procs(&[&[6], &[5]]);
        procs[0].admit();
        procs[0].begin_slice();
        procs[0].consume(4); // remaining 2 vs 5
        procs[0].yield_back();
        let ready = ready_of(&[0, 1]);
        assert_eq!(Srtf.select(&ready, &procs), 0);
    }

    #[test]
    fn rr_slice_is_bounded_by_quantum_and_burst() {
        let procs = procs(&[&[5], &[1]]);
        let rr = RoundRobin::new(NonZeroU64::new(2).unwrap());
        assert_eq!(rr.slice(&procs[0]), 2);
        assert_eq!(rr.slice(&procs[1]), 1);
    }

    #[test]
    fn from_name_covers_the_five_policies() {
        for name in ["FIFO", "SJF", "SRTF", "CFS"] {
            assert!(from_name(name, None).is_some(), "{name}");
        }
        assert!(from_name("RR", NonZeroU64::new(2)).is_some());
        assert!(from_name("RR", None).is_none());
        assert!(from_name("LOTTERY", None).is_none());
    }
}
