//! Plain-data graph description: vertices, edges, state declarations.
//!
//! Everything here holds expression *text*; parsing happens in
//! [`compile`](crate::compile).  The fluent constructors exist for loaders,
//! tests, and demo models — a `Graph` is equally constructible field by
//! field.

use teg_core::{EdgeId, ValueType, VertexId};

// ── StateVariable ─────────────────────────────────────────────────────────────

/// A declared simulation state variable: name plus fixed type tag.
///
/// The simulator instantiates each declaration at its type's default value
/// when a run starts; the declared tag is enforced on every assignment.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateVariable {
    pub name:       String,
    pub value_type: ValueType,
}

impl StateVariable {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }
}

// ── Vertex ────────────────────────────────────────────────────────────────────

/// An event type: named, with body statements executed at dispatch and
/// declared bound-parameter names.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub name: String,

    /// Body statements (expression texts), executed in declared order when
    /// an event of this type dispatches.
    pub body: Vec<String>,

    /// Names the entry's parameter snapshot binds to at dispatch.
    pub params: Vec<String>,

    /// Exactly one vertex per graph carries this flag; the run starts with a
    /// synthetic schedule entry for it at time zero.
    pub is_start: bool,
}

impl Vertex {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:     name.into(),
            body:     Vec::new(),
            params:   Vec::new(),
            is_start: false,
        }
    }

    /// A vertex with the starting flag set.
    pub fn start(name: impl Into<String>) -> Self {
        let mut v = Self::new(name);
        v.is_start = true;
        v
    }

    pub fn body(mut self, statements: &[&str]) -> Self {
        self.body = statements.iter().map(|s| (*s).to_owned()).collect();
        self
    }

    pub fn params(mut self, names: &[&str]) -> Self {
        self.params = names.iter().map(|s| (*s).to_owned()).collect();
        self
    }
}

// ── Edge ──────────────────────────────────────────────────────────────────────

/// What firing an edge does to the pending-event set.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeAction {
    /// Insert a new entry for the target vertex at `clock + delay`.
    Schedule,
    /// Remove the earliest pending entry for the target vertex.
    CancelNext,
    /// Remove every pending entry for the target vertex.
    CancelAll,
}

/// A transition from one vertex to another.
///
/// `condition` guards the edge (absent = always fires); `delay`, `priority`,
/// and `params` are expression texts evaluated when the source vertex
/// dispatches.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub source:    VertexId,
    pub target:    VertexId,
    pub action:    EdgeAction,
    pub condition: Option<String>,
    pub delay:     String,
    pub priority:  String,
    pub params:    Vec<String>,
}

impl Edge {
    fn new(source: VertexId, target: VertexId, action: EdgeAction) -> Self {
        Self {
            source,
            target,
            action,
            condition: None,
            delay:     "0".to_owned(),
            priority:  "0".to_owned(),
            params:    Vec::new(),
        }
    }

    pub fn schedule(source: VertexId, target: VertexId) -> Self {
        Self::new(source, target, EdgeAction::Schedule)
    }

    pub fn cancel_next(source: VertexId, target: VertexId) -> Self {
        Self::new(source, target, EdgeAction::CancelNext)
    }

    pub fn cancel_all(source: VertexId, target: VertexId) -> Self {
        Self::new(source, target, EdgeAction::CancelAll)
    }

    pub fn condition(mut self, text: &str) -> Self {
        self.condition = Some(text.to_owned());
        self
    }

    pub fn delay(mut self, text: &str) -> Self {
        self.delay = text.to_owned();
        self
    }

    pub fn priority(mut self, text: &str) -> Self {
        self.priority = text.to_owned();
        self
    }

    pub fn params(mut self, texts: &[&str]) -> Self {
        self.params = texts.iter().map(|s| (*s).to_owned()).collect();
        self
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// A complete event-graph description, read-only during a run.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    pub vertices:  Vec<Vertex>,
    pub edges:     Vec<Edge>,
    pub variables: Vec<StateVariable>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state variable.
    pub fn add_variable(&mut self, name: impl Into<String>, value_type: ValueType) {
        self.variables.push(StateVariable::new(name, value_type));
    }

    /// Append a vertex, returning its ID.
    pub fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(vertex);
        id
    }

    /// Append an edge, returning its ID.  Edge order is preserved: outgoing
    /// edges fire in declaration order.
    pub fn add_edge(&mut self, edge: Edge) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(edge);
        id
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    /// Look a vertex up by name.
    pub fn find_vertex(&self, name: &str) -> Option<VertexId> {
        self.vertices
            .iter()
            .position(|v| v.name == name)
            .map(|i| VertexId(i as u32))
    }

    /// The vertex flagged as starting, if exactly one exists.
    pub fn start_vertex(&self) -> Option<VertexId> {
        let mut found = None;
        for (i, v) in self.vertices.iter().enumerate() {
            if v.is_start {
                if found.is_some() {
                    return None;
                }
                found = Some(VertexId(i as u32));
            }
        }
        found
    }
}
