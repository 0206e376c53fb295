//! `TraceObserver<W>` — bridges `RunObserver` to an `OutputWriter`.

use teg_core::{SimTime, VariableValue};
use teg_sim::RunObserver;

use crate::row::TraceRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`RunObserver`] that writes every fired event to any [`OutputWriter`]
/// backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct TraceObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> RunObserver for TraceObserver<W> {
    fn on_event_fired(&mut self, clock: SimTime, vertex: &str, trace: &[(String, VariableValue)]) {
        let row = TraceRow {
            time:   clock.0,
            vertex: vertex.to_owned(),
            values: trace.iter().map(|(_, value)| value.to_string()).collect(),
        };
        let result = self.writer.write_fired(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, _final_clock: SimTime, _dispatched: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
