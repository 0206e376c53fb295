//! Run observer trait for trace consumption and progress reporting.

use teg_core::{SimTime, VariableValue};

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at key
/// points in the run loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — console trace
///
/// ```rust,ignore
/// struct Printer;
///
/// impl RunObserver for Printer {
///     fn on_event_fired(&mut self, clock: SimTime, vertex: &str, trace: &[(String, VariableValue)]) {
///         println!("{clock}  {vertex}  {trace:?}");
///     }
/// }
/// ```
pub trait RunObserver {
    /// Called once before the first event dispatches.
    fn on_run_start(&mut self, _clock: SimTime) {}

    /// Called after each dispatched event.
    ///
    /// `trace` holds the registered trace expressions' labels and their
    /// values evaluated against the post-event state, in registration order.
    fn on_event_fired(
        &mut self,
        _clock:  SimTime,
        _vertex: &str,
        _trace:  &[(String, VariableValue)],
    ) {
    }

    /// Called once when the run ends (event list empty, stop condition hit,
    /// or both).
    fn on_run_end(&mut self, _final_clock: SimTime, _dispatched: u64) {}
}

/// A [`RunObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
