//! The `Simulation` struct and its event loop.

use std::sync::Arc;

use teg_core::{SimTime, VariableValue, VertexId};
use teg_expr::{Expr, ExprError};
use teg_graph::{CompiledGraph, EdgeAction};
use teg_schedule::{FutureEventList, ScheduleEntry};

use crate::context::RunContext;
use crate::error::{SimError, SimResult};
use crate::observer::RunObserver;
use crate::stop::StopCondition;

// ── FiredEvent ────────────────────────────────────────────────────────────────

/// Everything reported about one dispatched event.
#[derive(Clone, Debug)]
pub struct FiredEvent {
    pub clock:  SimTime,
    pub vertex: VertexId,
    pub name:   String,
    /// Registered trace expressions' labels and values, in registration order.
    pub trace:  Vec<(String, VariableValue)>,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// One simulation run: the clock, the compiled graph, the pending-event
/// list, and the evaluation context, driven by [`run`][Self::run].
///
/// Create via [`SimBuilder`][crate::SimBuilder].  After the run ends the
/// state variables remain readable through [`variable`][Self::variable].
pub struct Simulation {
    pub(crate) graph:      CompiledGraph,
    pub(crate) clock:      SimTime,
    pub(crate) events:     FutureEventList,
    pub(crate) ctx:        RunContext,
    pub(crate) stops:      Vec<StopCondition>,
    pub(crate) traces:     Vec<(String, Arc<Expr>)>,
    pub(crate) dispatched: u64,
    /// Dispatch counters per vertex, indexed by `VertexId`.
    pub(crate) counts:     Vec<u64>,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("clock", &self.clock)
            .field("dispatched", &self.dispatched)
            .field("counts", &self.counts)
            .finish_non_exhaustive()
    }
}

impl Simulation {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the event list empties or a stop condition holds.
    ///
    /// Calls observer hooks once per dispatched event.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: RunObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        observer.on_run_start(self.clock);
        while let Some(fired) = self.run_one()? {
            observer.on_event_fired(fired.clock, &fired.name, &fired.trace);
        }
        observer.on_run_end(self.clock, self.dispatched);
        Ok(())
    }

    /// Dispatch at most one event.  Returns `None` when the run is over
    /// (event list empty or a stop condition holds).
    ///
    /// Useful for single-stepping in tests and interactive frontends.
    pub fn run_one(&mut self) -> SimResult<Option<FiredEvent>> {
        if self.events.is_empty() || self.stop_satisfied()? {
            return Ok(None);
        }
        let Some(entry) = self.events.pop_earliest() else {
            return Ok(None);
        };
        self.dispatch(entry).map(Some)
    }

    /// The current clock (the time of the last dispatched event).
    pub fn clock(&self) -> SimTime {
        self.clock
    }

    /// Total events dispatched so far.
    pub fn events_dispatched(&self) -> u64 {
        self.dispatched
    }

    /// How many events of the named vertex have dispatched.
    pub fn dispatch_count(&self, vertex: &str) -> Option<u64> {
        self.graph
            .find_vertex(vertex)
            .map(|id| self.counts[id.index()])
    }

    /// Read a state variable (valid during and after the run).
    pub fn variable(&self, name: &str) -> Option<&VariableValue> {
        self.ctx.variable(name)
    }

    /// Entries still pending in the event list.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn graph(&self) -> &CompiledGraph {
        &self.graph
    }

    // ── Core dispatch ─────────────────────────────────────────────────────

    fn dispatch(&mut self, entry: ScheduleEntry) -> SimResult<FiredEvent> {
        // The ordering invariant guarantees monotonicity; popping can never
        // move the clock backwards.
        debug_assert!(entry.time >= self.clock);
        self.clock = entry.time;
        let clock = self.clock;

        let graph = &self.graph;
        let ctx = &mut self.ctx;
        let events = &mut self.events;

        let vertex = graph.vertex(entry.vertex);

        // ── ② Bind the entry's parameter snapshot ─────────────────────────
        ctx.bind_params(&vertex.params, &entry.params);

        // ── ③ Body statements in declared order ───────────────────────────
        for statement in &vertex.body {
            statement.evaluate(ctx).map_err(|source| SimError::BodyEval {
                vertex: vertex.name.clone(),
                source,
            })?;
        }

        // ── ④ Outgoing edges in declared order ────────────────────────────
        for edge in graph.edges_from(entry.vertex) {
            let label = graph.edge_label(edge);

            if let Some(condition) = &edge.condition {
                let value = condition.evaluate(ctx).map_err(|source| SimError::EdgeEval {
                    edge: label.clone(),
                    role: "condition",
                    source,
                })?;
                let fire = value.truthy().map_err(|source| SimError::EdgeEval {
                    edge: label.clone(),
                    role: "condition",
                    source: ExprError::Value {
                        node: condition.to_string(),
                        source,
                    },
                })?;
                if !fire {
                    continue;
                }
            }

            // Delay and priority are evaluated for every firing edge —
            // including cancel edges, whose values go unused — so side
            // effects inside them are not conditional on the action.
            let delay = eval_numeric(ctx, &edge.delay, &label, "delay")?;
            let priority = eval_numeric(ctx, &edge.priority, &label, "priority")?;

            let mut params = Vec::with_capacity(edge.params.len());
            for expr in &edge.params {
                let value = expr.evaluate(ctx).map_err(|source| SimError::EdgeEval {
                    edge: label.clone(),
                    role: "parameter",
                    source,
                })?;
                params.push(value);
            }

            match edge.action {
                EdgeAction::Schedule => {
                    if delay < 0.0 {
                        return Err(SimError::NegativeDelay { edge: label, delay });
                    }
                    events.insert(ScheduleEntry::new(
                        clock.offset(delay),
                        priority,
                        edge.target,
                        params,
                    ));
                }
                EdgeAction::CancelNext => {
                    let filter = (!params.is_empty()).then_some(params.as_slice());
                    // A miss is explicitly not an error.
                    events.cancel_next(edge.target, filter);
                }
                EdgeAction::CancelAll => {
                    let filter = (!params.is_empty()).then_some(params.as_slice());
                    events.cancel_all(edge.target, filter);
                }
            }
        }

        let name = vertex.name.clone();

        // ── ⑤ Counters and trace notification ─────────────────────────────
        self.dispatched += 1;
        self.counts[entry.vertex.index()] += 1;

        let mut trace = Vec::with_capacity(self.traces.len());
        for (trace_label, expr) in &self.traces {
            let value = expr.evaluate(&mut self.ctx).map_err(|source| SimError::TraceEval {
                label: trace_label.clone(),
                source,
            })?;
            trace.push((trace_label.clone(), value));
        }

        Ok(FiredEvent {
            clock,
            vertex: entry.vertex,
            name,
            trace,
        })
    }

    fn stop_satisfied(&mut self) -> SimResult<bool> {
        for stop in &self.stops {
            if stop.satisfied(self.clock, self.dispatched, &self.counts, &mut self.ctx)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Evaluate an edge expression that must come out numeric (delay, priority).
fn eval_numeric(
    ctx:  &mut RunContext,
    expr: &Expr,
    edge: &str,
    role: &'static str,
) -> SimResult<f64> {
    let value = expr.evaluate(ctx).map_err(|source| SimError::EdgeEval {
        edge: edge.to_owned(),
        role,
        source,
    })?;
    value.as_double(role).map_err(|source| SimError::EdgeEval {
        edge: edge.to_owned(),
        role,
        source: ExprError::Value {
            node: expr.to_string(),
            source,
        },
    })
}
