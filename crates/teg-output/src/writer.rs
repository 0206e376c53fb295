//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, TraceRow};

/// Trait implemented by trace output backends.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`TraceObserver::take_error`](crate::TraceObserver::take_error).
pub trait OutputWriter {
    /// Write one fired-event row.
    fn write_fired(&mut self, row: &TraceRow) -> OutputResult<()>;

    /// Flush and close the underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
