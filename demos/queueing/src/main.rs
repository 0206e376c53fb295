//! queueing — single-server queue with breakdowns, the canonical timed
//! event graph.
//!
//! Customers ENTER with exponential interarrival times; an idle server
//! STARTs the next customer immediately (same clock, higher priority
//! value); service completes at LEAVE.  The server occasionally FAILs:
//! a pending LEAVE is cancelled, the interrupted customer rejoins the
//! queue, and a FIX restores service after a repair delay.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use teg_core::{RunConfig, ValueType};
use teg_graph::{Edge, Graph, Vertex};
use teg_output::{CsvTraceWriter, TraceObserver};
use teg_sim::SimBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:             u64 = 42;
const DEPARTURE_TARGET: u64 = 50; // stop after this many completed services

// ── Model ─────────────────────────────────────────────────────────────────────

/// Queue-with-breakdowns event graph.
///
/// State: QUEUE = waiting customers, SERVER = 1 when idle and up, 0 when
/// busy or down.
fn build_graph() -> Graph {
    let mut g = Graph::new();
    g.add_variable("QUEUE", ValueType::Integer);
    g.add_variable("SERVER", ValueType::Integer);

    let run = g.add_vertex(Vertex::start("RUN").body(&["QUEUE = 0", "SERVER = 1"]));
    let enter = g.add_vertex(Vertex::new("ENTER").body(&["QUEUE = QUEUE + 1"]));
    let start = g.add_vertex(Vertex::new("START").body(&["QUEUE = QUEUE - 1", "SERVER = 0"]));
    let leave = g.add_vertex(Vertex::new("LEAVE").body(&["SERVER = 1"]));
    // On failure, a busy server (SERVER == 0) puts its customer back.
    let fail = g.add_vertex(
        Vertex::new("FAIL").body(&["QUEUE = QUEUE + (1 - SERVER)", "SERVER = 0"]),
    );
    let fix = g.add_vertex(Vertex::new("FIX").body(&["SERVER = 1"]));

    // Arrivals and service.
    g.add_edge(Edge::schedule(run, enter));
    g.add_edge(Edge::schedule(enter, enter).delay("exponential(4.0)"));
    g.add_edge(Edge::schedule(enter, start).condition("SERVER > 0").priority("5"));
    g.add_edge(Edge::schedule(start, leave).delay("uniform(2.0, 3.0)"));
    g.add_edge(Edge::schedule(leave, start).condition("QUEUE > 0").priority("5"));

    // Breakdowns: cancel the in-flight completion, repair, resume.
    g.add_edge(Edge::schedule(run, fail).delay("uniform(10.0, 20.0)"));
    g.add_edge(Edge::cancel_next(fail, leave));
    g.add_edge(Edge::schedule(fail, fix).delay("uniform(5.0, 8.0)"));
    g.add_edge(Edge::schedule(fail, fail).delay("uniform(20.0, 30.0)"));
    g.add_edge(Edge::schedule(fix, start).condition("QUEUE > 0").priority("5"));

    g
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== queueing — rust_teg event graph ===");
    println!("Seed: {SEED}  |  Target: {DEPARTURE_TARGET} departures");
    println!();

    // 1. Build and compile the model (syntax errors surface here).
    let graph = build_graph();
    let mut sim = SimBuilder::new(&graph, RunConfig::new(SEED))?
        .stop_when_count("LEAVE", DEPARTURE_TARGET)
        .trace("queue", "QUEUE")
        .trace("up", "SERVER")
        .build()?;

    // 2. Trace output.
    std::fs::create_dir_all("output/queueing")?;
    let writer = CsvTraceWriter::create(Path::new("output/queueing/trace.csv"), &["queue", "up"])?;
    let mut observer = TraceObserver::new(writer);

    // 3. Run.
    let t0 = Instant::now();
    sim.run(&mut observer)?;
    let elapsed = t0.elapsed();

    if let Some(e) = observer.take_error() {
        eprintln!("output error: {e}");
    }

    // 4. Summary.
    println!("Run complete in {:.3} ms", elapsed.as_secs_f64() * 1e3);
    println!("  final clock : {}", sim.clock());
    println!("  events      : {}", sim.events_dispatched());
    println!();

    println!("{:<10} {:<10}", "Vertex", "Dispatched");
    println!("{}", "-".repeat(20));
    for name in ["RUN", "ENTER", "START", "LEAVE", "FAIL", "FIX"] {
        println!("{:<10} {:<10}", name, sim.dispatch_count(name).unwrap_or(0));
    }
    println!();
    println!(
        "Final state: QUEUE={} SERVER={}",
        sim.variable("QUEUE").map(ToString::to_string).unwrap_or_default(),
        sim.variable("SERVER").map(ToString::to_string).unwrap_or_default(),
    );
    println!("Trace written to output/queueing/trace.csv");

    Ok(())
}
