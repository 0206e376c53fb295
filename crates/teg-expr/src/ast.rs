//! The typed AST produced by the parser.
//!
//! Trees are immutable: parsed once per distinct expression text, evaluated
//! possibly many times against different contexts.  `Display` renders the
//! source form (fully parenthesized) and is what evaluation errors embed to
//! identify the failing node.

use std::fmt;

use teg_core::VariableValue;

// ── Operators ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum UnaryOp {
    /// Arithmetic negation `-x`.
    Neg,
    /// Logical negation `!x`.
    Not,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Assign,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    /// Eager `&`: both sides always evaluated.
    And,
    /// Eager `|`: both sides always evaluated.
    Or,
    /// Short-circuit `&&`.
    CondAnd,
    /// Short-circuit `||`.
    CondOr,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add     => "+",
            BinaryOp::Sub     => "-",
            BinaryOp::Mul     => "*",
            BinaryOp::Div     => "/",
            BinaryOp::Assign  => "=",
            BinaryOp::Lt      => "<",
            BinaryOp::Gt      => ">",
            BinaryOp::Le      => "<=",
            BinaryOp::Ge      => ">=",
            BinaryOp::Eq      => "==",
            BinaryOp::Ne      => "!=",
            BinaryOp::And     => "&",
            BinaryOp::Or      => "|",
            BinaryOp::CondAnd => "&&",
            BinaryOp::CondOr  => "||",
        }
    }
}

// ── Expr ──────────────────────────────────────────────────────────────────────

/// One node of a parsed expression.
///
/// Operand subtrees are always present (`Box`, never optional) and the parser
/// only ever builds `Assign` with a `Variable` on the left.
#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    /// A literal value.
    Value(VariableValue),

    /// A bare symbol read as a variable (or registry constant) reference.
    Variable(String),

    /// `name(arg, …)` — dispatched by name through the evaluation context.
    Call { name: String, args: Vec<Expr> },

    Unary {
        op:      UnaryOp,
        operand: Box<Expr>,
    },

    Binary {
        op:  BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Value(VariableValue::String(s)) => {
                write!(f, "\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
            }
            Expr::Value(v) => write!(f, "{v}"),
            Expr::Variable(name) => write!(f, "{name}"),
            Expr::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Expr::Unary { op, operand } => write!(f, "{}{operand}", op.symbol()),
            Expr::Binary { op, lhs, rhs } => {
                write!(f, "({lhs} {} {rhs})", op.symbol())
            }
        }
    }
}
