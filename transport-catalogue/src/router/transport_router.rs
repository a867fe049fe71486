//! Itinerary queries over a built route graph.

use tracing::trace;

use super::{EdgeInfo, RouteGraph};
use crate::catalogue::TransportCatalogue;
use crate::domain::{BusId, StopId};
use crate::graph::{Dijkstra, PathSolver};

/// One boarding in an itinerary: wait at `stop`, then ride `bus`.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryLine {
    /// Stop where the bus is boarded.
    pub stop: StopId,
    pub bus: BusId,
    /// Minutes spent waiting before boarding.
    pub wait_time: f64,
    /// Minutes spent on the bus.
    pub ride_time: f64,
    /// Number of stop-to-stop hops ridden.
    pub span_count: usize,
}

/// Fastest way between two stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    /// Total minutes including all waits.
    pub total_time: f64,
    pub lines: Vec<ItineraryLine>,
}

/// Answers itinerary queries for a catalogue and its route graph.
///
/// The router only borrows both; it never mutates the graph.
pub struct TransportRouter<'a, S: PathSolver = Dijkstra> {
    catalogue: &'a TransportCatalogue,
    route_graph: &'a RouteGraph,
    solver: S,
}

impl<'a> TransportRouter<'a> {
    /// Create a router using Dijkstra's algorithm.
    pub fn new(catalogue: &'a TransportCatalogue, route_graph: &'a RouteGraph) -> Self {
        Self::with_solver(catalogue, route_graph, Dijkstra)
    }
}

impl<'a, S: PathSolver> TransportRouter<'a, S> {
    /// Create a router with a specific path solver.
    pub fn with_solver(
        catalogue: &'a TransportCatalogue,
        route_graph: &'a RouteGraph,
        solver: S,
    ) -> Self {
        Self {
            catalogue,
            route_graph,
            solver,
        }
    }

    /// Fastest itinerary between two named stops.
    ///
    /// Returns `None` if either stop is unknown or `to` cannot be reached.
    pub fn compute_route(&self, from: &str, to: &str) -> Option<Itinerary> {
        let from = self.catalogue.stop_id(from)?;
        let to = self.catalogue.stop_id(to)?;
        self.compute_route_between(from, to)
    }

    /// Fastest itinerary between two stop handles.
    pub fn compute_route_between(&self, from: StopId, to: StopId) -> Option<Itinerary> {
        let graph = self.route_graph.graph();
        let path = self
            .solver
            .shortest_path(graph, from.wait_vertex(), to.wait_vertex())?;

        let mut lines = Vec::new();
        let mut pending_wait = 0.0;

        for &edge_id in &path.edges {
            let edge = graph.edge(edge_id)?;
            match *self.route_graph.edge_info(edge_id)? {
                EdgeInfo::Wait { .. } => pending_wait = edge.weight,
                EdgeInfo::Ride {
                    stop,
                    bus,
                    span_count,
                } => {
                    lines.push(ItineraryLine {
                        stop,
                        bus,
                        wait_time: pending_wait,
                        ride_time: edge.weight,
                        span_count,
                    });
                    pending_wait = 0.0;
                }
            }
        }

        trace!(
            from = %from,
            to = %to,
            total_time = path.weight,
            lines = lines.len(),
            "route computed"
        );

        Some(Itinerary {
            total_time: path.weight,
            lines,
        })
    }
}
