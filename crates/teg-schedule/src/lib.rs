//! `teg-schedule` — the future event list.
//!
//! Pending events are ordered by `(time ascending, priority ascending)` and
//! dispatched strictly FIFO among equal keys, so a run's dispatch order is a
//! pure function of its insertion order.  Cancellation that matches nothing
//! is a defined no-op, not an error — this crate has no error type.
//!
//! | Module         | Contents                                 |
//! |----------------|------------------------------------------|
//! | [`entry`]      | `ScheduleEntry`, `EventKey`              |
//! | [`event_list`] | `FutureEventList`                        |

pub mod entry;
pub mod event_list;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use entry::{EventKey, ScheduleEntry};
pub use event_list::FutureEventList;
