//! The `EvalContext` trait — the boundary between the expression engine and
//! simulation state.

use teg_core::VariableValue;

use crate::error::ExprResult;

/// Name resolution for variable reads/writes and function dispatch.
///
/// The expression engine never constructs concrete contexts; the simulation
/// driver supplies one per run, backed by state-variable storage plus a
/// registered function library.  Implementations must be deterministic: for
/// fixed context state and a fixed random seed, repeated evaluation of the
/// same AST produces bit-identical results.
///
/// Methods take `&mut self` because evaluation is allowed to mutate: `=`
/// writes through [`set_variable`][Self::set_variable], and variate functions
/// advance the run's RNG inside [`call_function`][Self::call_function].
pub trait EvalContext {
    /// Read a variable (or read-only constant) by name.
    fn get_variable(&self, name: &str) -> ExprResult<VariableValue>;

    /// Write a variable by name.
    ///
    /// Fails with `VariableNotFound` for unknown names and
    /// `AssignTypeMismatch` when the value's tag is incompatible with the
    /// variable's declared type.
    fn set_variable(&mut self, name: &str, value: VariableValue) -> ExprResult<()>;

    /// Dispatch a function call by name with already-evaluated arguments.
    ///
    /// Fails with `FunctionNotFound` for unknown names and
    /// `ArgumentMismatch` when arity or argument tags don't fit.
    fn call_function(&mut self, name: &str, args: &[VariableValue]) -> ExprResult<VariableValue>;
}
