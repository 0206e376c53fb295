//! AST evaluation against an [`EvalContext`].

use std::cmp::Ordering;

use teg_core::VariableValue;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::context::EvalContext;
use crate::error::{ExprError, ExprResult};

impl Expr {
    /// Evaluate this tree against `ctx`, producing a value or the first
    /// failure.
    ///
    /// Value-model failures (type mismatch, integer divide by zero) are
    /// re-raised tagged with the source form of the failing node so the
    /// simulator can report a precise location.  There are no retries.
    pub fn evaluate(&self, ctx: &mut dyn EvalContext) -> ExprResult<VariableValue> {
        match self {
            Expr::Value(v) => Ok(v.clone()),

            Expr::Variable(name) => ctx.get_variable(name),

            // Arguments evaluate left to right, then the call dispatches by
            // name through the context.
            Expr::Call { name, args } => {
                let mut evaluated = Vec::with_capacity(args.len());
                for arg in args {
                    evaluated.push(arg.evaluate(ctx)?);
                }
                ctx.call_function(name, &evaluated)
            }

            Expr::Unary { op, operand } => {
                let value = operand.evaluate(ctx)?;
                let result = match op {
                    UnaryOp::Neg => value.neg(),
                    UnaryOp::Not => value.not(),
                };
                result.map_err(|e| self.node_error(e))
            }

            Expr::Binary { op, lhs, rhs } => self.binary(*op, lhs, rhs, ctx),
        }
    }

    fn binary(
        &self,
        op:  BinaryOp,
        lhs: &Expr,
        rhs: &Expr,
        ctx: &mut dyn EvalContext,
    ) -> ExprResult<VariableValue> {
        match op {
            // ── Assignment: rhs first, then write through the context ──────
            BinaryOp::Assign => {
                let name = match lhs {
                    Expr::Variable(name) => name,
                    other => {
                        return Err(ExprError::InvalidAssignmentTarget {
                            node: other.to_string(),
                        });
                    }
                };
                let value = rhs.evaluate(ctx)?;
                ctx.set_variable(name, value.clone())?;
                Ok(value)
            }

            // ── Short-circuit: the right side only runs when required ──────
            //
            // Right operands may assign or draw random numbers, so the
            // evaluate-left-then-maybe-right order is part of the contract.
            BinaryOp::CondAnd => {
                let left = lhs.evaluate(ctx)?;
                if !left.truthy().map_err(|e| self.node_error(e))? {
                    return Ok(VariableValue::Boolean(false));
                }
                let right = rhs.evaluate(ctx)?;
                let b = right.truthy().map_err(|e| self.node_error(e))?;
                Ok(VariableValue::Boolean(b))
            }
            BinaryOp::CondOr => {
                let left = lhs.evaluate(ctx)?;
                if left.truthy().map_err(|e| self.node_error(e))? {
                    return Ok(VariableValue::Boolean(true));
                }
                let right = rhs.evaluate(ctx)?;
                let b = right.truthy().map_err(|e| self.node_error(e))?;
                Ok(VariableValue::Boolean(b))
            }

            // ── Eager logical: both sides always evaluate ──────────────────
            BinaryOp::And | BinaryOp::Or => {
                let left = lhs.evaluate(ctx)?;
                let right = rhs.evaluate(ctx)?;
                let l = left.truthy().map_err(|e| self.node_error(e))?;
                let r = right.truthy().map_err(|e| self.node_error(e))?;
                let b = if op == BinaryOp::And { l && r } else { l || r };
                Ok(VariableValue::Boolean(b))
            }

            // ── Arithmetic and comparison ──────────────────────────────────
            _ => {
                let left = lhs.evaluate(ctx)?;
                let right = rhs.evaluate(ctx)?;
                self.apply_value_op(op, &left, &right)
                    .map_err(|e| self.node_error(e))
            }
        }
    }

    fn apply_value_op(
        &self,
        op:    BinaryOp,
        left:  &VariableValue,
        right: &VariableValue,
    ) -> teg_core::ValueResult<VariableValue> {
        use VariableValue::Boolean;
        match op {
            BinaryOp::Add => left.add(right),
            BinaryOp::Sub => left.sub(right),
            BinaryOp::Mul => left.mul(right),
            BinaryOp::Div => left.div(right),
            BinaryOp::Eq  => Ok(Boolean(left.equals(right)?)),
            BinaryOp::Ne  => Ok(Boolean(!left.equals(right)?)),
            BinaryOp::Lt  => Ok(Boolean(left.compare(right, "<")? == Ordering::Less)),
            BinaryOp::Gt  => Ok(Boolean(left.compare(right, ">")? == Ordering::Greater)),
            BinaryOp::Le  => Ok(Boolean(left.compare(right, "<=")? != Ordering::Greater)),
            BinaryOp::Ge  => Ok(Boolean(left.compare(right, ">=")? != Ordering::Less)),
            // Assign and the logical operators are handled in `binary`.
            _ => unreachable!("non-value operator routed to apply_value_op"),
        }
    }

    fn node_error(&self, source: teg_core::ValueError) -> ExprError {
        ExprError::Value {
            node: self.to_string(),
            source,
        }
    }
}
