//! Construction of the routing graph from a catalogue.
//!
//! Every stop owns two vertices: a wait vertex where passengers arrive and
//! a ride vertex they reach after waiting for a bus. Wait edges join the
//! two. Ride edges run from the ride vertex of one stop to the wait vertex
//! of a later stop on the same bus, one edge for every ordered pair of
//! positions, so staying on a bus for several stops is a single edge.

use std::time::Instant;

use tracing::{debug, info};

use super::{RouterError, RoutingSettings};
use crate::catalogue::TransportCatalogue;
use crate::domain::{BusId, StopId};
use crate::graph::{DirectedWeightedGraph, Edge, EdgeId};

/// What a graph edge means in terms of the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInfo {
    /// Waiting for a bus at `stop`.
    Wait { stop: StopId },

    /// Riding `bus` from `stop` for `span_count` stops.
    Ride {
        stop: StopId,
        bus: BusId,
        span_count: usize,
    },
}

impl EdgeInfo {
    /// The stop where this edge starts.
    pub fn stop(&self) -> StopId {
        match self {
            EdgeInfo::Wait { stop } | EdgeInfo::Ride { stop, .. } => *stop,
        }
    }
}

/// Builds a [`RouteGraph`] from a populated catalogue.
///
/// `build` consumes the builder, so a graph is built exactly once per
/// builder.
#[derive(Debug, Clone)]
pub struct RouteGraphBuilder {
    settings: RoutingSettings,
}

impl RouteGraphBuilder {
    /// Create a builder after checking the settings are usable.
    pub fn new(settings: RoutingSettings) -> Result<Self, RouterError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Build the graph for every stop and bus in the catalogue.
    pub fn build(self, catalogue: &TransportCatalogue) -> RouteGraph {
        let started = Instant::now();
        let settings = self.settings;

        let mut graph = DirectedWeightedGraph::new(catalogue.stop_count() * 2);
        let mut edges = Vec::new();

        for (stop, _) in catalogue.stops() {
            graph.add_edge(Edge {
                from: stop.wait_vertex(),
                to: stop.ride_vertex(),
                weight: settings.wait_minutes(),
            });
            edges.push(EdgeInfo::Wait { stop });
        }

        for (bus_id, bus) in catalogue.buses() {
            let stops = &bus.stops;
            for i in 0..stops.len() {
                let mut meters = 0u64;
                for j in (i + 1)..stops.len() {
                    meters += u64::from(catalogue.distance(stops[j - 1], stops[j]));
                    graph.add_edge(Edge {
                        from: stops[i].ride_vertex(),
                        to: stops[j].wait_vertex(),
                        weight: settings.ride_minutes(meters),
                    });
                    edges.push(EdgeInfo::Ride {
                        stop: stops[i],
                        bus: bus_id,
                        span_count: j - i,
                    });
                }
            }
            debug!(bus = %bus.name, stops = stops.len(), "added ride edges");
        }

        info!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "route graph built"
        );

        RouteGraph {
            settings,
            graph,
            edges,
        }
    }
}

/// A built routing graph with its edge side table.
///
/// Obtained either from [`RouteGraphBuilder::build`] or by loading a
/// snapshot; there is no other way to get one, so every router is backed
/// by a complete graph.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGraph {
    settings: RoutingSettings,
    graph: DirectedWeightedGraph,
    edges: Vec<EdgeInfo>,
}

impl RouteGraph {
    /// Reassemble a graph from persisted parts without recomputing weights.
    ///
    /// Callers must have checked that `edges` has one entry per graph edge.
    pub(crate) fn restore(
        settings: RoutingSettings,
        graph: DirectedWeightedGraph,
        edges: Vec<EdgeInfo>,
    ) -> Self {
        Self {
            settings,
            graph,
            edges,
        }
    }

    pub fn settings(&self) -> &RoutingSettings {
        &self.settings
    }

    pub fn graph(&self) -> &DirectedWeightedGraph {
        &self.graph
    }

    /// Domain meaning of an edge.
    pub fn edge_info(&self, id: EdgeId) -> Option<&EdgeInfo> {
        self.edges.get(id)
    }

    /// Domain meaning of every edge, in edge id order.
    pub fn edge_infos(&self) -> &[EdgeInfo] {
        &self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;
    use approx::assert_abs_diff_eq;

    fn catalogue() -> TransportCatalogue {
        let mut catalogue = TransportCatalogue::new();
        catalogue.add_stop("A", Coordinates::new(55.60, 37.20));
        catalogue.add_stop("B", Coordinates::new(55.61, 37.21));
        catalogue.add_stop("C", Coordinates::new(55.62, 37.22));
        catalogue.add_distance("A", "B", 1200).unwrap();
        catalogue.add_distance("B", "C", 600).unwrap();
        catalogue
    }

    #[test]
    fn rejects_invalid_settings() {
        let err = RouteGraphBuilder::new(RoutingSettings::new(6, 0.0)).unwrap_err();
        assert!(matches!(err, RouterError::InvalidSettings(_)));
    }

    #[test]
    fn one_wait_edge_per_stop() {
        let catalogue = catalogue();
        let route_graph = RouteGraphBuilder::new(RoutingSettings::new(6, 36.0))
            .unwrap()
            .build(&catalogue);

        assert_eq!(route_graph.graph().vertex_count(), 6);
        assert_eq!(route_graph.graph().edge_count(), 3);
        for (id, info) in route_graph.edge_infos().iter().enumerate() {
            let EdgeInfo::Wait { stop } = *info else {
                panic!("expected only wait edges");
            };
            let edge = route_graph.graph().edge(id).unwrap();
            assert_eq!(edge.from, stop.wait_vertex());
            assert_eq!(edge.to, stop.ride_vertex());
            assert_abs_diff_eq!(edge.weight, 6.0);
        }
    }

    #[test]
    fn ride_edge_for_every_pair() {
        let mut catalogue = catalogue();
        catalogue.add_bus("1", &["A", "B", "C"], true).unwrap();
        let route_graph = RouteGraphBuilder::new(RoutingSettings::new(6, 36.0))
            .unwrap()
            .build(&catalogue);

        let rides: Vec<_> = route_graph
            .edge_infos()
            .iter()
            .enumerate()
            .filter_map(|(id, info)| match info {
                EdgeInfo::Ride { span_count, .. } => Some((id, *span_count)),
                EdgeInfo::Wait { .. } => None,
            })
            .collect();

        // (A,B) (A,C) (B,C)
        assert_eq!(rides.len(), 3);
        assert_eq!(
            rides.iter().map(|(_, span)| *span).collect::<Vec<_>>(),
            vec![1, 2, 1]
        );

        let a = catalogue.stop_id("A").unwrap();
        let c = catalogue.stop_id("C").unwrap();
        let (a_to_c, _) = rides[1];
        let edge = route_graph.graph().edge(a_to_c).unwrap();
        assert_eq!(edge.from, a.ride_vertex());
        assert_eq!(edge.to, c.wait_vertex());
        // 1800 m at 600 m/min
        assert_abs_diff_eq!(edge.weight, 3.0, epsilon = 1e-9);
        assert_eq!(route_graph.edge_info(a_to_c).unwrap().stop(), a);
    }

    #[test]
    fn linear_route_covers_both_directions() {
        let mut catalogue = catalogue();
        catalogue.add_bus("2", &["A", "B", "C"], false).unwrap();
        let route_graph = RouteGraphBuilder::new(RoutingSettings::default())
            .unwrap()
            .build(&catalogue);

        // Traversal A B C B A has 5 positions, so 10 ordered pairs
        let ride_count = route_graph
            .edge_infos()
            .iter()
            .filter(|info| matches!(info, EdgeInfo::Ride { .. }))
            .count();
        assert_eq!(ride_count, 10);
        assert_eq!(route_graph.edge_infos().len(), route_graph.graph().edge_count());
    }

    #[test]
    fn reverse_direction_uses_resolved_distance() {
        let mut catalogue = catalogue();
        catalogue.add_distance("C", "B", 3000).unwrap();
        catalogue.add_bus("3", &["A", "B", "C"], false).unwrap();
        let route_graph = RouteGraphBuilder::new(RoutingSettings::new(0, 36.0))
            .unwrap()
            .build(&catalogue);

        let c = catalogue.stop_id("C").unwrap();
        let b = catalogue.stop_id("B").unwrap();
        let edge = route_graph
            .graph()
            .edges()
            .iter()
            .find(|e| e.from == c.ride_vertex() && e.to == b.wait_vertex())
            .unwrap();
        assert_abs_diff_eq!(edge.weight, 5.0, epsilon = 1e-9);
    }
}
