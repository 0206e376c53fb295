//! Fluent builder for constructing a [`Simulation`].

use teg_core::{RunConfig, SimRng, SimTime, VariableValue};
use teg_expr::ExprCache;
use teg_graph::{CompiledGraph, Graph};
use teg_library::FunctionRegistry;
use teg_schedule::{FutureEventList, ScheduleEntry};

use crate::context::RunContext;
use crate::error::{SimError, SimResult};
use crate::sim::Simulation;
use crate::stop::StopCondition;

/// Fluent builder for [`Simulation`].
///
/// # Required inputs
///
/// - a [`Graph`] (compiled here — any `SyntaxError` in the model surfaces
///   from [`new`][Self::new], before a run can start)
/// - a [`RunConfig`] — seed plus optional clock/event caps
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                           |
/// |-------------------------|-----------------------------------|
/// | `.library(r)`           | `FunctionRegistry::standard()`    |
/// | `.start_params(v)`      | none (start vertex declares none) |
/// | `.stop_when(text)`      | —                                 |
/// | `.stop_when_count(v,n)` | —                                 |
/// | `.trace(label, text)`   | —                                 |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(&graph, RunConfig::new(42))?
///     .stop_when_count("LEAVE", 1_000)
///     .trace("queue", "QUEUE")
///     .trace("busy", "SERVER == 0")
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    graph:        CompiledGraph,
    config:       RunConfig,
    registry:     Option<FunctionRegistry>,
    start_params: Vec<VariableValue>,
    stop_exprs:   Vec<String>,
    stop_counts:  Vec<(String, u64)>,
    traces:       Vec<(String, String)>,
}

impl SimBuilder {
    /// Compile `graph` and create a builder.  Fails fast on any validation
    /// or expression syntax error in the model.
    pub fn new(graph: &Graph, config: RunConfig) -> SimResult<Self> {
        Ok(Self::from_compiled(CompiledGraph::compile(graph)?, config))
    }

    /// Reuse an already compiled graph (several runs over one model).
    pub fn from_compiled(graph: CompiledGraph, config: RunConfig) -> Self {
        Self {
            graph,
            config,
            registry:     None,
            start_params: Vec::new(),
            stop_exprs:   Vec::new(),
            stop_counts:  Vec::new(),
            traces:       Vec::new(),
        }
    }

    /// Supply the function/constant registry.  Defaults to
    /// [`FunctionRegistry::standard`].
    pub fn library(mut self, registry: FunctionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Parameter values bound to the starting vertex's declared parameter
    /// names for the synthetic entry at time zero.
    pub fn start_params(mut self, params: Vec<VariableValue>) -> Self {
        self.start_params = params;
        self
    }

    /// Stop once the named vertex has dispatched `count` times.
    pub fn stop_when_count(mut self, vertex: &str, count: u64) -> Self {
        self.stop_counts.push((vertex.to_owned(), count));
        self
    }

    /// Stop once `expr_text` (in the engine's own language) evaluates true.
    /// Parsed at [`build`][Self::build] time.
    pub fn stop_when(mut self, expr_text: &str) -> Self {
        self.stop_exprs.push(expr_text.to_owned());
        self
    }

    /// Register a trace expression, evaluated after every dispatched event
    /// and reported to the observer under `label`.
    pub fn trace(mut self, label: &str, expr_text: &str) -> Self {
        self.traces.push((label.to_owned(), expr_text.to_owned()));
        self
    }

    /// Validate the remaining inputs and assemble a ready-to-run
    /// [`Simulation`] with the starting entry already scheduled.
    pub fn build(self) -> SimResult<Simulation> {
        let graph = self.graph;

        // ── Start parameters must fit the start vertex's declaration ──────
        let start = graph.start();
        let declared = graph.vertex(start).params.len();
        if self.start_params.len() != declared {
            return Err(SimError::Config(format!(
                "start vertex `{}` declares {} parameter(s), got {}",
                graph.vertex(start).name,
                declared,
                self.start_params.len()
            )));
        }

        // ── Assemble stop conditions ──────────────────────────────────────
        //
        // The config's caps become ordinary stop conditions so the run loop
        // has a single check path.
        let mut stops = Vec::new();
        if let Some(max_clock) = self.config.max_clock {
            stops.push(StopCondition::MaxClock(max_clock));
        }
        if let Some(max_events) = self.config.max_events {
            stops.push(StopCondition::MaxEvents(max_events));
        }
        for (name, count) in self.stop_counts {
            let vertex = graph.find_vertex(&name).ok_or_else(|| {
                SimError::Config(format!("stop condition references unknown vertex `{name}`"))
            })?;
            stops.push(StopCondition::MaxCountOf { vertex, count });
        }

        // The builder owns its own expression cache for stop and trace
        // expressions; its lifetime ends with build().
        let mut cache = ExprCache::new();
        for text in self.stop_exprs {
            let expr = cache
                .parse(&text)
                .map_err(|source| SimError::StopExprParse { source })?;
            stops.push(StopCondition::Expression(expr));
        }

        let mut traces = Vec::with_capacity(self.traces.len());
        for (label, text) in self.traces {
            let expr = cache.parse(&text).map_err(|source| SimError::TraceExprParse {
                label: label.clone(),
                source,
            })?;
            traces.push((label, expr));
        }

        // ── Initial state: variables at defaults, start entry at t=0 ──────
        let registry = self.registry.unwrap_or_default();
        let ctx = RunContext::new(graph.variables(), registry, SimRng::new(self.config.seed));

        let mut events = FutureEventList::new();
        events.insert(ScheduleEntry::new(
            SimTime::ZERO,
            0.0,
            start,
            self.start_params,
        ));

        let counts = vec![0; graph.vertex_count()];

        Ok(Simulation {
            graph,
            clock: SimTime::ZERO,
            events,
            ctx,
            stops,
            traces,
            dispatched: 0,
            counts,
        })
    }
}
