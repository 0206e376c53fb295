//! `teg-sim` — the simulation driver for `rust_teg`.
//!
//! # Run loop
//!
//! ```text
//! insert synthetic entry for the starting vertex at t=0
//! while event list non-empty and no stop condition holds:
//!   ① Pop      — earliest (time, priority) entry; advance the clock to it.
//!   ② Bind     — the entry's parameter snapshot to the vertex's names.
//!   ③ Body     — execute the vertex's statements in declared order.
//!   ④ Edges    — for each outgoing edge in declared order:
//!                  condition false → skip
//!                  Schedule        → insert at clock + delay
//!                  CancelNext/All  → remove matching pending entries
//!   ⑤ Notify   — evaluate trace expressions, call the observer.
//! ```
//!
//! The loop is strictly single-threaded and synchronous; one call stack per
//! processed event, no locks, no suspension points.  A `Simulation` is
//! `Send`, so callers may move a run onto a background thread, and
//! independent runs own disjoint state.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use teg_core::RunConfig;
//! use teg_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(&graph, RunConfig::new(42).with_max_clock(1000.0))
//!     .trace("queue", "QUEUE")
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("dispatched {}", sim.events_dispatched());
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod observer;
pub mod sim;
pub mod stop;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimBuilder;
pub use context::RunContext;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, RunObserver};
pub use sim::{FiredEvent, Simulation};
pub use stop::StopCondition;
