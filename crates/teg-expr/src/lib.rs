//! `teg-expr` — the embedded expression language of the `rust_teg` simulator.
//!
//! Every triggering condition, delay, priority, parameter binding, and body
//! statement in an event graph is a small expression in this language,
//! evaluated against mutable simulation state through the [`EvalContext`]
//! boundary.
//!
//! # Pipeline
//!
//! ```text
//! text ──tokenize──▶ [Token] ──parse──▶ Expr (AST) ──evaluate(ctx)──▶ VariableValue
//! ```
//!
//! Parsing is a pure function of the input text: identical text always yields
//! a structurally identical AST.  Parsed trees are immutable and shared as
//! `Arc<Expr>` through [`ExprCache`], which is owned by whoever compiles a
//! graph — never process-global.
//!
//! # Grammar (precedence low → high)
//!
//! ```text
//! assignment      :=  Symbol '=' assignment | or_level
//! or_level        :=  and_level  (('||' | '|')  and_level)*
//! and_level       :=  equality   (('&&' | '&')  equality)*
//! equality        :=  relational (('==' | '!=') relational)*
//! relational      :=  additive   (('<' | '>' | '<=' | '>=') additive)*
//! additive        :=  multiplicative (('+' | '-') multiplicative)*
//! multiplicative  :=  unary      (('*' | '/') unary)*
//! unary           :=  ('-' | '!') unary | leaf
//! leaf            :=  literal | '(' assignment ')' | Symbol | Symbol '(' args ')'
//! ```
//!
//! `&&`/`||` short-circuit; `&`/`|` always evaluate both sides.  The
//! distinction is contractual because right operands may carry side effects
//! (assignments, random draws).

pub mod ast;
pub mod context;
pub mod error;
pub mod eval;
pub mod parser;
pub mod token;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use context::EvalContext;
pub use error::{ExprError, ExprResult};
pub use parser::{parse, ExprCache};
pub use token::{tokenize, Token};
