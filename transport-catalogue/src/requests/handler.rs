//! Answering stat requests against a loaded catalogue.

use tracing::trace;

use super::answer::{Answer, RouteItem};
use super::dto::{BaseRequest, StatRequest};
use crate::catalogue::{CatalogueError, TransportCatalogue};
use crate::domain::Coordinates;
use crate::render::{MapRenderer, RenderSettings};
use crate::router::{RouteGraph, TransportRouter};

/// Load base requests into a catalogue.
///
/// All stops go in first, then every road distance, then the buses, so
/// requests may refer to stops defined later in the list.
pub fn ingest(
    catalogue: &mut TransportCatalogue,
    requests: &[BaseRequest],
) -> Result<(), CatalogueError> {
    let stops = || {
        requests.iter().filter_map(|r| match r {
            BaseRequest::Stop(stop) => Some(stop),
            BaseRequest::Bus(_) => None,
        })
    };

    for stop in stops() {
        catalogue.add_stop(
            stop.name.clone(),
            Coordinates::new(stop.latitude, stop.longitude),
        );
    }

    for stop in stops() {
        for (to, &meters) in &stop.road_distances {
            catalogue.add_distance(&stop.name, to, meters)?;
        }
    }

    for request in requests {
        if let BaseRequest::Bus(bus) = request {
            catalogue.add_bus(&bus.name, &bus.stops, bus.is_roundtrip)?;
        }
    }

    Ok(())
}

/// Answers stat requests. Holds only shared borrows.
pub struct RequestHandler<'a> {
    catalogue: &'a TransportCatalogue,
    router: Option<TransportRouter<'a>>,
    render_settings: Option<&'a RenderSettings>,
}

impl<'a> RequestHandler<'a> {
    pub fn new(catalogue: &'a TransportCatalogue) -> Self {
        Self {
            catalogue,
            router: None,
            render_settings: None,
        }
    }

    /// Enable route queries.
    pub fn with_route_graph(mut self, route_graph: &'a RouteGraph) -> Self {
        self.router = Some(TransportRouter::new(self.catalogue, route_graph));
        self
    }

    /// Use these settings for map queries instead of the defaults.
    pub fn with_render_settings(mut self, settings: &'a RenderSettings) -> Self {
        self.render_settings = Some(settings);
        self
    }

    /// Answer every request, in order.
    pub fn answer_all(&self, requests: &[StatRequest]) -> Vec<Answer> {
        requests.iter().map(|r| self.answer(r)).collect()
    }

    /// Answer a single request.
    pub fn answer(&self, request: &StatRequest) -> Answer {
        let request_id = request.id();
        let answer = match request {
            StatRequest::Bus { name, .. } => self.bus_answer(request_id, name),
            StatRequest::Stop { name, .. } => self.stop_answer(request_id, name),
            StatRequest::Route { from, to, .. } => self.route_answer(request_id, from, to),
            StatRequest::Map { .. } => Some(self.map_answer(request_id)),
        };
        let answer = answer.unwrap_or(Answer::NotFound { request_id });
        trace!(request_id, not_found = answer.is_not_found(), "answered request");
        answer
    }

    fn bus_answer(&self, request_id: i64, name: &str) -> Option<Answer> {
        let bus = self.catalogue.bus(name)?;
        Some(Answer::Bus {
            request_id,
            curvature: bus.curvature,
            route_length: bus.distance,
            stop_count: bus.stop_count(),
            unique_stop_count: bus.unique_stops,
        })
    }

    fn stop_answer(&self, request_id: i64, name: &str) -> Option<Answer> {
        let stop = self.catalogue.stop(name)?;
        Some(Answer::Stop {
            request_id,
            buses: stop.buses.iter().cloned().collect(),
        })
    }

    fn route_answer(&self, request_id: i64, from: &str, to: &str) -> Option<Answer> {
        let itinerary = self.router.as_ref()?.compute_route(from, to)?;

        let mut items = Vec::with_capacity(itinerary.lines.len() * 2);
        for line in itinerary.lines {
            items.push(RouteItem::Wait {
                stop_name: self.catalogue.stop_by_id(line.stop).name.clone(),
                time: line.wait_time,
            });
            items.push(RouteItem::Bus {
                bus: self.catalogue.bus_by_id(line.bus).name.clone(),
                span_count: line.span_count,
                time: line.ride_time,
            });
        }

        Some(Answer::Route {
            request_id,
            total_time: itinerary.total_time,
            items,
        })
    }

    fn map_answer(&self, request_id: i64) -> Answer {
        let defaults;
        let settings = match self.render_settings {
            Some(settings) => settings,
            None => {
                defaults = RenderSettings::default();
                &defaults
            }
        };
        Answer::Map {
            request_id,
            map: MapRenderer::new(self.catalogue, settings).render(),
        }
    }
}
