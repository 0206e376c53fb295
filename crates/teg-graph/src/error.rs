//! Graph validation and compilation errors.

use thiserror::Error;

use teg_core::VertexId;
use teg_expr::ExprError;

/// Errors raised while validating or compiling a [`Graph`](crate::Graph).
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph has no starting vertex")]
    NoStartVertex,

    #[error("graph has multiple starting vertices: `{0}` and `{1}`")]
    MultipleStartVertices(String, String),

    #[error("duplicate vertex name `{0}`")]
    DuplicateVertex(String),

    #[error("duplicate state variable `{0}`")]
    DuplicateVariable(String),

    #[error("state variable `{0}` collides with a vertex parameter of `{1}`")]
    VariableShadowsParameter(String, String),

    #[error("edge {index} references out-of-range vertex {vertex}")]
    BadEndpoint { index: usize, vertex: VertexId },

    #[error("schedule edge `{edge}` supplies {got} parameters but `{target}` declares {expected}")]
    ParamCountMismatch {
        edge:     String,
        target:   String,
        expected: usize,
        got:      usize,
    },

    /// A syntax error in one of the graph's expressions, tagged with where
    /// the expression lives (vertex body, edge condition, …).
    #[error("in {place}: {source}")]
    Expr {
        place: String,
        source: ExprError,
    },
}

/// Shorthand result type for graph compilation.
pub type GraphResult<T> = Result<T, GraphError>;
