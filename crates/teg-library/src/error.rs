//! Function-dispatch error type.

use thiserror::Error;

use teg_core::ValueType;

/// Errors raised while resolving or invoking a registered function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    #[error("function `{0}` is not registered")]
    NotFound(String),

    #[error("`{name}` expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name:     String,
        expected: usize,
        got:      usize,
    },

    #[error("`{name}` argument {index} must be {expected}, got {got}")]
    ArgumentType {
        name:     String,
        /// 1-based position of the offending argument.
        index:    usize,
        expected: &'static str,
        got:      ValueType,
    },

    /// Arguments were well-typed but out of the function's domain
    /// (e.g. a negative standard deviation).
    #[error("`{name}`: {message}")]
    InvalidArgument { name: String, message: String },
}

/// Shorthand result type for function dispatch.
pub type LibraryResult<T> = Result<T, LibraryError>;
