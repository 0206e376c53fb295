//! Fail-fast compilation of a [`Graph`] into pre-parsed form.
//!
//! Compilation is the only place graph expression text meets the parser.
//! Every body statement, condition, delay, priority, and parameter is parsed
//! here, so a `SyntaxError` always surfaces before a run begins — tagged
//! with the vertex or edge that owns the offending text.

use std::sync::Arc;

use teg_core::{EdgeId, VertexId};
use teg_expr::{Expr, ExprCache};

use crate::error::{GraphError, GraphResult};
use crate::graph::{EdgeAction, Graph, StateVariable};

// ── Compiled node types ───────────────────────────────────────────────────────

/// A vertex with its body statements parsed.
#[derive(Clone, Debug)]
pub struct CompiledVertex {
    pub name:   String,
    pub body:   Vec<Arc<Expr>>,
    pub params: Vec<String>,
}

/// An edge with every expression parsed.
#[derive(Clone, Debug)]
pub struct CompiledEdge {
    pub source:    VertexId,
    pub target:    VertexId,
    pub action:    EdgeAction,
    pub condition: Option<Arc<Expr>>,
    pub delay:     Arc<Expr>,
    pub priority:  Arc<Expr>,
    pub params:    Vec<Arc<Expr>>,
}

// ── CompiledGraph ─────────────────────────────────────────────────────────────

/// A validated, fully parsed graph, ready to drive a run.
///
/// Parsed trees are shared `Arc<Expr>`s: the expression cache used during
/// compilation deduplicates identical text, and its lifetime ends with
/// compilation — nothing here is process-global.
#[derive(Clone, Debug)]
pub struct CompiledGraph {
    vertices:        Vec<CompiledVertex>,
    edges:           Vec<CompiledEdge>,
    /// Outgoing edge IDs per vertex, in edge-declaration order.
    edges_by_source: Vec<Vec<EdgeId>>,
    variables:       Vec<StateVariable>,
    start:           VertexId,
}

impl CompiledGraph {
    /// Validate `graph` and parse every expression in it.
    pub fn compile(graph: &Graph) -> GraphResult<Self> {
        validate_names(graph)?;
        let start = find_start(graph)?;

        let mut cache = ExprCache::new();

        // ── Vertices ──────────────────────────────────────────────────────
        let mut vertices = Vec::with_capacity(graph.vertices.len());
        for vertex in &graph.vertices {
            let mut body = Vec::with_capacity(vertex.body.len());
            for (i, statement) in vertex.body.iter().enumerate() {
                let parsed = cache.parse(statement).map_err(|source| GraphError::Expr {
                    place: format!("body statement {} of vertex `{}`", i + 1, vertex.name),
                    source,
                })?;
                body.push(parsed);
            }
            vertices.push(CompiledVertex {
                name:   vertex.name.clone(),
                body,
                params: vertex.params.clone(),
            });
        }

        // ── Edges ─────────────────────────────────────────────────────────
        let mut edges = Vec::with_capacity(graph.edges.len());
        let mut edges_by_source = vec![Vec::new(); graph.vertices.len()];
        for (index, edge) in graph.edges.iter().enumerate() {
            for endpoint in [edge.source, edge.target] {
                if endpoint.index() >= graph.vertices.len() {
                    return Err(GraphError::BadEndpoint {
                        index,
                        vertex: endpoint,
                    });
                }
            }

            let label = edge_label(graph, edge.source, edge.target);
            let mut parse = |what: &str, text: &str| {
                cache.parse(text).map_err(|source| GraphError::Expr {
                    place: format!("{what} of edge `{label}`"),
                    source,
                })
            };

            let condition = match &edge.condition {
                Some(text) => Some(parse("condition", text)?),
                None => None,
            };
            let delay = parse("delay", &edge.delay)?;
            let priority = parse("priority", &edge.priority)?;
            let mut params = Vec::with_capacity(edge.params.len());
            for (i, text) in edge.params.iter().enumerate() {
                params.push(parse(&format!("parameter {}", i + 1), text)?);
            }

            // A Schedule edge's parameters bind pairwise to the target's
            // declared names, so the counts must line up.
            if edge.action == EdgeAction::Schedule {
                let declared = graph.vertices[edge.target.index()].params.len();
                if params.len() != declared {
                    return Err(GraphError::ParamCountMismatch {
                        edge:     label,
                        target:   graph.vertices[edge.target.index()].name.clone(),
                        expected: declared,
                        got:      params.len(),
                    });
                }
            }

            edges_by_source[edge.source.index()].push(EdgeId(index as u32));
            edges.push(CompiledEdge {
                source: edge.source,
                target: edge.target,
                action: edge.action,
                condition,
                delay,
                priority,
                params,
            });
        }

        Ok(Self {
            vertices,
            edges,
            edges_by_source,
            variables: graph.variables.clone(),
            start,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn start(&self) -> VertexId {
        self.start
    }

    pub fn vertex(&self, id: VertexId) -> &CompiledVertex {
        &self.vertices[id.index()]
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn find_vertex(&self, name: &str) -> Option<VertexId> {
        self.vertices
            .iter()
            .position(|v| v.name == name)
            .map(|i| VertexId(i as u32))
    }

    /// Outgoing edges of `vertex` in declaration order.
    pub fn edges_from(&self, vertex: VertexId) -> impl Iterator<Item = &CompiledEdge> {
        self.edges_by_source[vertex.index()]
            .iter()
            .map(|id| &self.edges[id.index()])
    }

    pub fn variables(&self) -> &[StateVariable] {
        &self.variables
    }

    /// Human-readable identity for error reporting: `SOURCE -> TARGET`.
    pub fn edge_label(&self, edge: &CompiledEdge) -> String {
        format!(
            "{} -> {}",
            self.vertices[edge.source.index()].name,
            self.vertices[edge.target.index()].name
        )
    }
}

// ── Validation helpers ────────────────────────────────────────────────────────

fn validate_names(graph: &Graph) -> GraphResult<()> {
    for (i, vertex) in graph.vertices.iter().enumerate() {
        if graph.vertices[..i].iter().any(|v| v.name == vertex.name) {
            return Err(GraphError::DuplicateVertex(vertex.name.clone()));
        }
    }
    for (i, var) in graph.variables.iter().enumerate() {
        if graph.variables[..i].iter().any(|v| v.name == var.name) {
            return Err(GraphError::DuplicateVariable(var.name.clone()));
        }
        // Parameter bindings shadow state variables at dispatch; a collision
        // would make the state variable unreachable inside that vertex.
        for vertex in &graph.vertices {
            if vertex.params.iter().any(|p| *p == var.name) {
                return Err(GraphError::VariableShadowsParameter(
                    var.name.clone(),
                    vertex.name.clone(),
                ));
            }
        }
    }
    Ok(())
}

fn find_start(graph: &Graph) -> GraphResult<VertexId> {
    let mut found: Option<VertexId> = None;
    for (i, vertex) in graph.vertices.iter().enumerate() {
        if vertex.is_start {
            if let Some(prev) = found {
                return Err(GraphError::MultipleStartVertices(
                    graph.vertices[prev.index()].name.clone(),
                    vertex.name.clone(),
                ));
            }
            found = Some(VertexId(i as u32));
        }
    }
    found.ok_or(GraphError::NoStartVertex)
}

fn edge_label(graph: &Graph, source: VertexId, target: VertexId) -> String {
    let name = |id: VertexId| {
        graph
            .vertices
            .get(id.index())
            .map(|v| v.name.as_str())
            .unwrap_or("?")
    };
    format!("{} -> {}", name(source), name(target))
}
