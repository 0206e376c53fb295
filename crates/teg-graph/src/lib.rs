//! `teg-graph` — the static description of a timed event graph.
//!
//! A [`Graph`] is plain data: vertices (event types), edges (transitions)
//! whose conditions/delays/priorities/parameters are expression *text*, and
//! state-variable declarations.  External loaders produce it; the simulator
//! consumes it read-only.
//!
//! [`CompiledGraph::compile`] turns that text into parsed ASTs up front,
//! through one [`ExprCache`](teg_expr::ExprCache) whose lifetime is tied to
//! the compiled graph.  Any syntax error is surfaced here — with the owning
//! vertex or edge named — so no parse failure can interrupt a run in
//! progress.
//!
//! | Module      | Contents                                         |
//! |-------------|--------------------------------------------------|
//! | [`graph`]   | `Graph`, `Vertex`, `Edge`, `EdgeAction`, `StateVariable` |
//! | [`compile`] | `CompiledGraph`, `CompiledVertex`, `CompiledEdge`|
//! | [`error`]   | `GraphError`, `GraphResult`                      |

pub mod compile;
pub mod error;
pub mod graph;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use compile::{CompiledEdge, CompiledGraph, CompiledVertex};
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, EdgeAction, Graph, StateVariable, Vertex};
