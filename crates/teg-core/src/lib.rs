//! `teg-core` — foundational types for the `rust_teg` event-graph simulator.
//!
//! This crate is a dependency of every other `teg-*` crate.  It intentionally
//! has no `teg-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                            |
//! |-----------|-----------------------------------------------------|
//! | [`ids`]   | `VertexId`, `EdgeId`                                |
//! | [`time`]  | `SimTime`, `RunConfig`                              |
//! | [`rng`]   | `SimRng` (seeded, reproducible)                     |
//! | [`value`] | `ValueType`, `VariableValue` and the promotion rules|
//! | [`error`] | `ValueError`, `ValueResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod value;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ValueError, ValueResult};
pub use ids::{EdgeId, VertexId};
pub use rng::SimRng;
pub use time::{RunConfig, SimTime};
pub use value::{ValueType, VariableValue};
