//! Monotonic simulated clock.
//!
//! The clock only advances when the engine explicitly moves time forward,
//! either by executing a dispatch slice or by skipping an idle gap. This
//! keeps every run deterministic and replayable.

/// Simulated time, counted in abstract ticks with no wall-clock meaning.
pub type Tick = u64;

/// Tick-based simulated clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SimClock {
    now: Tick,
}

impl SimClock {
    /// Create a new clock at tick 0.
    pub fn new() -> Self {
        Self { now: 0 }
    }

    /// Current time in ticks.
    #[inline(always)]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Advance to an absolute tick.
    #[inline(always)]
    pub fn advance_to(&mut self, t: Tick) {
        debug_assert!(t >= self.now);
        self.now = t;
    }

    /// Advance by a delta, saturating on overflow.
    #[inline(always)]
    pub fn advance_by(&mut self, dt: Tick) {
        self.now = self.now.saturating_add(dt);
    }
}
