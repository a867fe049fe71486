//! Single-source shortest paths with a binary heap.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{DirectedWeightedGraph, EdgeId, VertexId};

/// A shortest path: its total weight and the edges it follows.
#[derive(Debug, Clone, PartialEq)]
pub struct PathInfo {
    pub weight: f64,
    pub edges: Vec<EdgeId>,
}

/// Finds shortest paths over a [`DirectedWeightedGraph`].
///
/// This abstraction lets the router swap solvers (or use a precomputed
/// all-pairs table) without touching its domain translation.
pub trait PathSolver {
    /// Shortest path from `from` to `to`.
    ///
    /// Returns `None` if `to` is unreachable or either vertex is out of range.
    /// A path from a vertex to itself is empty with weight `0`.
    fn shortest_path(
        &self,
        graph: &DirectedWeightedGraph,
        from: VertexId,
        to: VertexId,
    ) -> Option<PathInfo>;
}

/// Dijkstra's algorithm, computed per query.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    vertex: VertexId,
}

impl Eq for State {}

// Flip the ordering so the max-heap pops the cheapest state first
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PathSolver for Dijkstra {
    fn shortest_path(
        &self,
        graph: &DirectedWeightedGraph,
        from: VertexId,
        to: VertexId,
    ) -> Option<PathInfo> {
        let n = graph.vertex_count();
        if from >= n || to >= n {
            return None;
        }

        let mut dist = vec![f64::INFINITY; n];
        let mut prev_edge: Vec<Option<EdgeId>> = vec![None; n];
        let mut heap = BinaryHeap::new();

        dist[from] = 0.0;
        heap.push(State {
            cost: 0.0,
            vertex: from,
        });

        while let Some(State { cost, vertex }) = heap.pop() {
            if vertex == to {
                break;
            }
            // Stale entry
            if cost > dist[vertex] {
                continue;
            }

            for &edge_id in graph.incident_edges(vertex) {
                let Some(edge) = graph.edge(edge_id) else {
                    continue;
                };
                let next = cost + edge.weight;
                if next < dist[edge.to] {
                    dist[edge.to] = next;
                    prev_edge[edge.to] = Some(edge_id);
                    heap.push(State {
                        cost: next,
                        vertex: edge.to,
                    });
                }
            }
        }

        if dist[to].is_infinite() {
            return None;
        }

        let mut edges = Vec::new();
        let mut current = to;
        while let Some(edge_id) = prev_edge[current] {
            edges.push(edge_id);
            current = graph.edge(edge_id)?.from;
            if current == from {
                break;
            }
        }
        edges.reverse();

        Some(PathInfo {
            weight: dist[to],
            edges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;
    use approx::assert_abs_diff_eq;

    fn edge(from: VertexId, to: VertexId, weight: f64) -> Edge {
        Edge { from, to, weight }
    }

    #[test]
    fn picks_cheaper_detour() {
        let mut graph = DirectedWeightedGraph::new(4);
        let direct = graph.add_edge(edge(0, 3, 10.0));
        let a = graph.add_edge(edge(0, 1, 1.0));
        let b = graph.add_edge(edge(1, 2, 1.0));
        let c = graph.add_edge(edge(2, 3, 1.0));

        let path = Dijkstra.shortest_path(&graph, 0, 3).unwrap();
        assert_abs_diff_eq!(path.weight, 3.0);
        assert_eq!(path.edges, vec![a, b, c]);
        assert!(!path.edges.contains(&direct));
    }

    #[test]
    fn picks_direct_edge_when_cheaper() {
        let mut graph = DirectedWeightedGraph::new(3);
        graph.add_edge(edge(0, 1, 2.0));
        graph.add_edge(edge(1, 2, 2.0));
        let direct = graph.add_edge(edge(0, 2, 3.0));

        let path = Dijkstra.shortest_path(&graph, 0, 2).unwrap();
        assert_eq!(path.edges, vec![direct]);
        assert_abs_diff_eq!(path.weight, 3.0);
    }

    #[test]
    fn same_vertex_is_empty_path() {
        let mut graph = DirectedWeightedGraph::new(2);
        graph.add_edge(edge(0, 1, 1.0));
        let path = Dijkstra.shortest_path(&graph, 1, 1).unwrap();
        assert!(path.edges.is_empty());
        assert_eq!(path.weight, 0.0);
    }

    #[test]
    fn unreachable_is_none() {
        let mut graph = DirectedWeightedGraph::new(3);
        graph.add_edge(edge(0, 1, 1.0));
        assert!(Dijkstra.shortest_path(&graph, 0, 2).is_none());
        // Edges are directed
        assert!(Dijkstra.shortest_path(&graph, 1, 0).is_none());
    }

    #[test]
    fn out_of_range_is_none() {
        let graph = DirectedWeightedGraph::new(2);
        assert!(Dijkstra.shortest_path(&graph, 0, 7).is_none());
        assert!(Dijkstra.shortest_path(&graph, 7, 0).is_none());
    }

    #[test]
    fn zero_weight_cycle_terminates() {
        let mut graph = DirectedWeightedGraph::new(3);
        graph.add_edge(edge(0, 1, 0.0));
        graph.add_edge(edge(1, 0, 0.0));
        let last = graph.add_edge(edge(1, 2, 5.0));
        let path = Dijkstra.shortest_path(&graph, 0, 2).unwrap();
        assert_eq!(path.edges.last(), Some(&last));
        assert_abs_diff_eq!(path.weight, 5.0);
    }
}
