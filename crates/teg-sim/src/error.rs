//! Simulation-driver error type.
//!
//! Evaluation failures are modeling defects, not transient conditions: they
//! halt the run and carry the owning vertex/edge identity plus the role of
//! the failing expression, so the caller can point at the exact spot in the
//! model.

use thiserror::Error;

use teg_expr::ExprError;
use teg_graph::GraphError;

#[derive(Debug, Error)]
pub enum SimError {
    /// Validation or compilation failure — surfaced before the run starts.
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("in body of vertex `{vertex}`: {source}")]
    BodyEval {
        vertex: String,
        source: ExprError,
    },

    #[error("in {role} of edge `{edge}`: {source}")]
    EdgeEval {
        edge:   String,
        role:   &'static str,
        source: ExprError,
    },

    #[error("in trace expression `{label}`: {source}")]
    TraceEval {
        label:  String,
        source: ExprError,
    },

    #[error("in stop condition: {source}")]
    StopEval { source: ExprError },

    #[error("failed to parse stop expression: {source}")]
    StopExprParse { source: ExprError },

    #[error("failed to parse trace expression `{label}`: {source}")]
    TraceExprParse {
        label:  String,
        source: ExprError,
    },

    /// A Schedule edge computed a delay that would move the clock backwards.
    #[error("edge `{edge}` produced negative delay {delay}")]
    NegativeDelay { edge: String, delay: f64 },
}

/// Shorthand result type for the simulation driver.
pub type SimResult<T> = Result<T, SimError>;
