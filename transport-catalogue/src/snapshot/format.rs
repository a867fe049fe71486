//! On-disk record layout.
//!
//! Records refer to each other by arena index only. Nothing here is part of
//! the public API; bump [`FORMAT_VERSION`] whenever the layout changes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::SnapshotError;
use crate::catalogue::TransportCatalogue;
use crate::domain::{Bus, BusId, Coordinates, Stop, StopId};
use crate::graph::{DirectedWeightedGraph, Edge};
use crate::render::RenderSettings;
use crate::router::{EdgeInfo, RouteGraph, RoutingSettings};

/// Leading bytes of every snapshot.
pub const MAGIC: [u8; 4] = *b"TCAT";

/// Current layout version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct SnapshotData {
    pub stops: Vec<StopRecord>,
    pub buses: Vec<BusRecord>,
    pub distances: Vec<DistanceRecord>,
    pub routing: Option<RoutingSettings>,
    pub graph: Option<GraphRecord>,
    pub render_settings: Option<RenderSettings>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct StopRecord {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct BusRecord {
    pub name: String,
    pub stops: Vec<usize>,
    pub is_ring: bool,
    pub unique_stops: usize,
    pub distance: u64,
    pub curvature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct DistanceRecord {
    pub from: usize,
    pub to: usize,
    pub meters: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct GraphRecord {
    pub vertex_count: usize,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct EdgeRecord {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
    pub info: EdgeInfoRecord,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) enum EdgeInfoRecord {
    Wait {
        stop: usize,
    },
    Ride {
        stop: usize,
        bus: usize,
        span_count: usize,
    },
}

impl SnapshotData {
    pub fn capture(
        catalogue: &TransportCatalogue,
        routing: Option<RoutingSettings>,
        route_graph: Option<&RouteGraph>,
        render_settings: Option<&RenderSettings>,
    ) -> Self {
        let stops = catalogue
            .stops()
            .map(|(_, stop)| StopRecord {
                name: stop.name.clone(),
                lat: stop.coordinates.lat,
                lng: stop.coordinates.lng,
            })
            .collect();

        let buses = catalogue
            .buses()
            .map(|(_, bus)| BusRecord {
                name: bus.name.clone(),
                stops: bus.stops.iter().map(|s| s.0).collect(),
                is_ring: bus.is_ring,
                unique_stops: bus.unique_stops,
                distance: bus.distance,
                curvature: bus.curvature,
            })
            .collect();

        let distances = catalogue
            .distances()
            .into_iter()
            .map(|(from, to, meters)| DistanceRecord {
                from: from.0,
                to: to.0,
                meters,
            })
            .collect();

        let graph = route_graph.map(|rg| GraphRecord {
            vertex_count: rg.graph().vertex_count(),
            edges: rg
                .graph()
                .edges()
                .iter()
                .zip(rg.edge_infos())
                .map(|(edge, info)| EdgeRecord {
                    from: edge.from,
                    to: edge.to,
                    weight: edge.weight,
                    info: match *info {
                        EdgeInfo::Wait { stop } => EdgeInfoRecord::Wait { stop: stop.0 },
                        EdgeInfo::Ride {
                            stop,
                            bus,
                            span_count,
                        } => EdgeInfoRecord::Ride {
                            stop: stop.0,
                            bus: bus.0,
                            span_count,
                        },
                    },
                })
                .collect(),
        });

        Self {
            stops,
            buses,
            distances,
            routing: route_graph.map(|rg| *rg.settings()).or(routing),
            graph,
            render_settings: render_settings.cloned(),
        }
    }

    /// Check every cross reference before anything is built.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let stop_count = self.stops.len();
        let bus_count = self.buses.len();

        let mut bus_names = HashSet::new();
        for (i, bus) in self.buses.iter().enumerate() {
            if !bus_names.insert(bus.name.as_str()) {
                return corrupt(format!("bus name {:?} appears twice", bus.name));
            }
            if let Some(&stop) = bus.stops.iter().find(|&&s| s >= stop_count) {
                return corrupt(format!("bus {i} refers to stop {stop}"));
            }
        }

        for d in &self.distances {
            if d.from >= stop_count || d.to >= stop_count {
                return corrupt(format!("distance {} -> {} refers to a missing stop", d.from, d.to));
            }
        }

        let Some(graph) = &self.graph else {
            return Ok(());
        };

        if self.routing.is_none() {
            return corrupt("graph present without routing settings".to_string());
        }
        if graph.vertex_count != stop_count * 2 {
            return corrupt(format!(
                "graph has {} vertices for {} stops",
                graph.vertex_count, stop_count
            ));
        }

        for (i, edge) in graph.edges.iter().enumerate() {
            if edge.from >= graph.vertex_count || edge.to >= graph.vertex_count {
                return corrupt(format!("edge {i} refers to a missing vertex"));
            }
            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return corrupt(format!("edge {i} has weight {}", edge.weight));
            }
            let in_range = match edge.info {
                EdgeInfoRecord::Wait { stop } => stop < stop_count,
                EdgeInfoRecord::Ride { stop, bus, .. } => stop < stop_count && bus < bus_count,
            };
            if !in_range {
                return corrupt(format!("edge {i} metadata refers to a missing record"));
            }
        }

        Ok(())
    }

    /// Build the in-memory structures. Must only be called after `validate`.
    pub fn into_parts(
        self,
    ) -> (
        TransportCatalogue,
        Option<RoutingSettings>,
        Option<RouteGraph>,
        Option<RenderSettings>,
    ) {
        let stops = self
            .stops
            .into_iter()
            .map(|r| Stop::new(r.name, Coordinates::new(r.lat, r.lng)))
            .collect();

        let buses = self
            .buses
            .into_iter()
            .map(|r| Bus {
                name: r.name,
                stops: r.stops.into_iter().map(StopId).collect(),
                is_ring: r.is_ring,
                unique_stops: r.unique_stops,
                distance: r.distance,
                curvature: r.curvature,
            })
            .collect();

        let distances = self
            .distances
            .into_iter()
            .map(|d| (StopId(d.from), StopId(d.to), d.meters));

        let catalogue = TransportCatalogue::restore(stops, buses, distances);

        let route_graph = match (self.graph, self.routing) {
            (Some(record), Some(settings)) => {
                let mut graph = DirectedWeightedGraph::new(record.vertex_count);
                let mut infos = Vec::with_capacity(record.edges.len());
                for edge in record.edges {
                    graph.add_edge(Edge {
                        from: edge.from,
                        to: edge.to,
                        weight: edge.weight,
                    });
                    infos.push(match edge.info {
                        EdgeInfoRecord::Wait { stop } => EdgeInfo::Wait {
                            stop: StopId(stop),
                        },
                        EdgeInfoRecord::Ride {
                            stop,
                            bus,
                            span_count,
                        } => EdgeInfo::Ride {
                            stop: StopId(stop),
                            bus: BusId(bus),
                            span_count,
                        },
                    });
                }
                Some(RouteGraph::restore(settings, graph, infos))
            }
            _ => None,
        };

        (catalogue, self.routing, route_graph, self.render_settings)
    }
}

fn corrupt(message: String) -> Result<(), SnapshotError> {
    Err(SnapshotError::Corrupt(message))
}
