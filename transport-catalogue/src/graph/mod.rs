//! Directed weighted graph and shortest-path solving.
//!
//! The graph knows nothing about stops or buses. Vertices and edges are
//! dense indices; callers keep their own side tables to give edges meaning.

mod dijkstra;

pub use dijkstra::{Dijkstra, PathInfo, PathSolver};

/// Index of a vertex, in `0..vertex_count`.
pub type VertexId = usize;

/// Index of an edge, in insertion order.
pub type EdgeId = usize;

/// A directed edge with a non-negative weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
}

/// Directed graph with a fixed vertex count and growable edge list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectedWeightedGraph {
    edges: Vec<Edge>,
    incidence: Vec<Vec<EdgeId>>,
}

impl DirectedWeightedGraph {
    /// Create a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence: vec![Vec::new(); vertex_count],
        }
    }

    /// Add an edge and return its id.
    ///
    /// # Panics
    ///
    /// Panics if `edge.from` is not a vertex of this graph.
    pub fn add_edge(&mut self, edge: Edge) -> EdgeId {
        let id = self.edges.len();
        self.incidence[edge.from].push(id);
        self.edges.push(edge);
        id
    }

    pub fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// All edges in id order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Ids of edges leaving `vertex`. Empty for unknown vertices.
    pub fn incident_edges(&self, vertex: VertexId) -> &[EdgeId] {
        self.incidence.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }
}
