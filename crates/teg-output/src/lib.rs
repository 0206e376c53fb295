//! `teg-output` — persisting fired-event traces.
//!
//! The simulator reports fired events through
//! [`RunObserver`](teg_sim::RunObserver); this crate bridges that callback
//! surface to an [`OutputWriter`] backend (currently CSV).  Observer methods
//! have no return value, so writer errors are stored internally and
//! retrieved with [`TraceObserver::take_error`] after the run.
//!
//! | Module       | Contents                              |
//! |--------------|---------------------------------------|
//! | [`row`]      | `TraceRow`                            |
//! | [`writer`]   | `OutputWriter` trait                  |
//! | [`csv`]      | `CsvTraceWriter`                      |
//! | [`observer`] | `TraceObserver<W>`                    |
//! | [`error`]    | `OutputError`, `OutputResult`         |

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use crate::csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::TraceRow;
pub use writer::OutputWriter;
