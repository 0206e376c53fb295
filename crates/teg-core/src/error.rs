//! Value-model error type.
//!
//! These errors describe illegal operations between tagged values.  The
//! expression evaluator in `teg-expr` wraps them with the identity of the
//! failing AST node; by themselves they only name the operator and the
//! offending tags.

use thiserror::Error;

use crate::ValueType;

/// An illegal operation on one or two [`VariableValue`](crate::VariableValue)s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("operator `{op}` is not defined between {lhs} and {rhs}")]
    TypeMismatch {
        op:  &'static str,
        lhs: ValueType,
        rhs: ValueType,
    },

    #[error("operator `{op}` is not defined for {operand}")]
    UnaryMismatch {
        op:      &'static str,
        operand: ValueType,
    },

    #[error("{0} value has no truth value")]
    NoTruthValue(ValueType),

    #[error("integer division by zero")]
    DivisionByZero,
}

/// Shorthand result type for value-model operations.
pub type ValueResult<T> = Result<T, ValueError>;
