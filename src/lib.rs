//! Deterministic discrete-event CPU-scheduling simulator.
//!
//! ## Scope
//! Replays a synthetic workload of processes, each alternating between CPU
//! execution and simulated I/O blocking, through one of five classical
//! scheduling policies (FIFO, SJF, SRTF, a fair-share rotation, and
//! quantum-based round robin), then derives per-process and aggregate
//! timing metrics.
//!
//! ## Key invariants
//! - Time is a monotonic integer tick count; the clock advances only
//!   through explicit engine steps (a dispatch slice or an idle skip).
//! - Original burst durations are immutable after load. Policies decrement
//!   a separate remaining-time counter, and every metric derives from the
//!   immutable originals.
//! - Selection ties resolve by ready-queue insertion order, never by
//!   arbitrary traversal, so a run is a pure function of
//!   (workload, policy, quantum).
//! - A run either completes every process or fails with a distinct stall
//!   error; it never spins and never exits silently.
//!
//! ## Flow
//! `text -> Workload -> Simulation::run(policy) -> RunReport (trace + metrics)`
//!
//! ## Entry points
//! - [`Workload::parse`]: workload description loading.
//! - [`Simulation`] driven by one of the [`policy`] implementations.
//! - [`RunReport`]: the execution trace and derived metric table.

pub mod clock;
pub mod engine;
pub mod metrics;
pub mod policy;
pub mod process;
pub mod trace;
pub mod workload;

pub use clock::{SimClock, Tick};
pub use engine::{SimError, Simulation};
pub use metrics::{ProcessMetrics, RunReport};
pub use policy::SchedPolicy;
pub use process::{ProcId, ProcState, ProcessRecord};
pub use trace::{TraceEvent, TraceLog};
pub use workload::{ProcessSpec, Workload, WorkloadError};
