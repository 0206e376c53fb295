//! Stop conditions, checked once per loop iteration before dispatch.
//!
//! Cancellation of a run is cooperative only: conditions are evaluated
//! between events, never mid-event.

use std::sync::Arc;

use teg_core::{SimTime, VertexId};
use teg_expr::Expr;

use crate::context::RunContext;
use crate::error::{SimError, SimResult};

/// One reason to end a run early.  Any satisfied condition stops the run.
pub enum StopCondition {
    /// Stop once the clock has reached this time.
    MaxClock(f64),

    /// Stop once this many events have been dispatched in total.
    MaxEvents(u64),

    /// Stop once a particular vertex has dispatched this many times.
    MaxCountOf { vertex: VertexId, count: u64 },

    /// Stop once an arbitrary boolean expression over the live state holds.
    Expression(Arc<Expr>),
}

impl StopCondition {
    /// Evaluate this condition against the run's current state.
    pub(crate) fn satisfied(
        &self,
        clock:      SimTime,
        dispatched: u64,
        counts:     &[u64],
        ctx:        &mut RunContext,
    ) -> SimResult<bool> {
        match self {
            StopCondition::MaxClock(max) => Ok(clock >= SimTime(*max)),
            StopCondition::MaxEvents(max) => Ok(dispatched >= *max),
            StopCondition::MaxCountOf { vertex, count } => {
                Ok(counts[vertex.index()] >= *count)
            }
            StopCondition::Expression(expr) => {
                let value = expr
                    .evaluate(ctx)
                    .map_err(|source| SimError::StopEval { source })?;
                value.truthy().map_err(|source| SimError::StopEval {
                    source: teg_expr::ExprError::Value {
                        node: expr.to_string(),
                        source,
                    },
                })
            }
        }
    }
}
