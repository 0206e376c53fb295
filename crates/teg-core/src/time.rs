//! Simulation time model.
//!
//! # Design
//!
//! Time is a continuous `f64` clock wrapped in `SimTime`.  Delays are
//! computed by expressions and may be any non-negative real, so an integer
//! tick counter would force a resolution choice on every model; the event
//! list orders entries by exact time instead.
//!
//! `SimTime` implements `Ord` through `f64::total_cmp`, which gives a total
//! order even in the presence of NaN — the event list and the dispatch loop
//! never have to reason about partial comparisons.

use std::cmp::Ordering;
use std::fmt;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute point on the simulation clock.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// The time `delay` units after `self`.
    #[inline]
    pub fn offset(self, delay: f64) -> SimTime {
        SimTime(self.0 + delay)
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Top-level configuration for one simulation run.
///
/// Typically constructed by the application and passed to
/// `SimBuilder::new`.  Stop criteria beyond the two caps here (per-event
/// counts, arbitrary boolean expressions) are added on the builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Stop once the clock reaches this time (inclusive).  `None` = no cap.
    pub max_clock: Option<f64>,

    /// Stop once this many events have been dispatched.  `None` = no cap.
    pub max_events: Option<u64>,
}

impl RunConfig {
    /// A config with the given seed and no stop caps.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            max_clock:  None,
            max_events: None,
        }
    }

    /// Cap the run at `clock` simulation time units.
    pub fn with_max_clock(mut self, clock: f64) -> Self {
        self.max_clock = Some(clock);
        self
    }

    /// Cap the run at `events` dispatched events.
    pub fn with_max_events(mut self, events: u64) -> Self {
        self.max_events = Some(events);
        self
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(0)
    }
}
