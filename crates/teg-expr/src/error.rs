//! Expression-engine error type.
//!
//! Two families share one enum: `Syntax` is raised at parse time and is
//! always fatal for that expression text; everything else is raised during
//! evaluation and carries enough identity (the rendered node or the name)
//! for the caller to report a precise location.

use thiserror::Error;

use teg_core::{ValueError, ValueType};

/// Errors raised while tokenizing, parsing, or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// A value-model failure (type mismatch, divide by zero), tagged with the
    /// source form of the AST node that raised it.
    #[error("in `{node}`: {source}")]
    Value {
        node: String,
        source: ValueError,
    },

    #[error("variable `{0}` not found")]
    VariableNotFound(String),

    #[error("function `{0}` not found")]
    FunctionNotFound(String),

    #[error("call to `{name}`: {message}")]
    ArgumentMismatch { name: String, message: String },

    #[error("cannot assign {got} to {expected} variable `{name}`")]
    AssignTypeMismatch {
        name:     String,
        expected: ValueType,
        got:      ValueType,
    },

    /// Only reachable through a hand-built AST: the parser guarantees the
    /// left side of `=` is a variable reference.
    #[error("left side of assignment is not a variable: `{node}`")]
    InvalidAssignmentTarget { node: String },
}

impl ExprError {
    /// Convenience constructor for parse-time failures.
    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        ExprError::Syntax {
            offset,
            message: message.into(),
        }
    }
}

/// Shorthand result type for the expression engine.
pub type ExprResult<T> = Result<T, ExprError>;
