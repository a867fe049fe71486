//! In-memory catalogue of stops, buses and road distances.
//!
//! The catalogue owns every [`Stop`] and [`Bus`] in append-only arenas.
//! Buses and the routing graph hold [`StopId`]/[`BusId`] handles into these
//! arenas, which stay valid because records are never removed or moved.
//!
//! Two insertion policies are deliberate:
//!
//! * adding a bus whose name already exists is a no-op, the first
//!   definition wins;
//! * adding a stop whose name already exists appends a new record and the
//!   name resolves to the newest one. Buses added earlier keep pointing at
//!   the record they were built with.

mod error;

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::domain::{Bus, BusId, Coordinates, Stop, StopId, compute_distance, expand_route};

pub use error::CatalogueError;

/// Catalogue of stops and bus routes.
#[derive(Debug, Clone, Default)]
pub struct TransportCatalogue {
    stops: Vec<Stop>,
    buses: Vec<Bus>,
    stop_index: HashMap<String, StopId>,
    bus_index: HashMap<String, BusId>,
    /// Bus handles ordered by bus name.
    sorted_buses: Vec<BusId>,
    /// Explicit road distances, keyed by ordered (from, to).
    distances: HashMap<(StopId, StopId), u32>,
}

impl TransportCatalogue {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop and return its handle.
    pub fn add_stop(&mut self, name: impl Into<String>, coordinates: Coordinates) -> StopId {
        let name = name.into();
        let id = StopId(self.stops.len());

        if self.stop_index.contains_key(&name) {
            warn!(stop = %name, "duplicate stop name, newest definition wins on lookup");
        }

        self.stop_index.insert(name.clone(), id);
        self.stops.push(Stop::new(name, coordinates));
        id
    }

    /// Add a bus route through the named stops.
    ///
    /// Returns `Ok(false)` without touching anything if a bus with this name
    /// already exists. Every stop must already be in the catalogue; if one
    /// is missing nothing is inserted.
    pub fn add_bus<S: AsRef<str>>(
        &mut self,
        name: &str,
        stop_names: &[S],
        is_ring: bool,
    ) -> Result<bool, CatalogueError> {
        if self.bus_index.contains_key(name) {
            debug!(bus = %name, "bus already defined, ignoring redefinition");
            return Ok(false);
        }

        let stops = stop_names
            .iter()
            .map(|s| {
                self.stop_id(s.as_ref())
                    .ok_or_else(|| CatalogueError::UnknownStop(s.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let unique_stops = stops.iter().collect::<HashSet<_>>().len();
        let stops = expand_route(stops, is_ring);

        let distance = self.road_length(&stops);
        let geo_length = self.geo_length(&stops);
        let curvature = if geo_length > 0.0 {
            distance as f64 / geo_length
        } else {
            0.0
        };

        let bus = Bus {
            name: name.to_string(),
            stops,
            is_ring,
            unique_stops,
            distance,
            curvature,
        };

        debug!(
            bus = %name,
            stops = bus.stops.len(),
            unique_stops,
            distance,
            curvature,
            "added bus"
        );

        self.insert_bus(bus);
        Ok(true)
    }

    /// Record the road distance from one stop to another.
    ///
    /// Overwrites any earlier value for the same ordered pair. The reverse
    /// direction is not touched.
    pub fn add_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<(), CatalogueError> {
        let from = self
            .stop_id(from)
            .ok_or_else(|| CatalogueError::UnknownStop(from.to_string()))?;
        let to = self
            .stop_id(to)
            .ok_or_else(|| CatalogueError::UnknownStop(to.to_string()))?;
        self.distances.insert((from, to), meters);
        Ok(())
    }

    /// Road distance between two stops in meters.
    ///
    /// Checks the explicit `(from, to)` entry, then `(to, from)`, and only
    /// then falls back to the rounded geodesic distance.
    pub fn distance(&self, from: StopId, to: StopId) -> u32 {
        if let Some(&d) = self.distances.get(&(from, to)) {
            return d;
        }
        if let Some(&d) = self.distances.get(&(to, from)) {
            return d;
        }
        compute_distance(
            self.stops[from.0].coordinates,
            self.stops[to.0].coordinates,
        )
        .round() as u32
    }

    /// Look up a stop by name.
    pub fn stop(&self, name: &str) -> Option<&Stop> {
        self.stop_id(name).map(|id| &self.stops[id.0])
    }

    /// Look up a bus by name.
    pub fn bus(&self, name: &str) -> Option<&Bus> {
        self.bus_id(name).map(|id| &self.buses[id.0])
    }

    /// Handle of the stop currently bound to `name`.
    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    /// Handle of the bus with this name.
    pub fn bus_id(&self, name: &str) -> Option<BusId> {
        self.bus_index.get(name).copied()
    }

    /// Resolve a stop handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this catalogue.
    pub fn stop_by_id(&self, id: StopId) -> &Stop {
        &self.stops[id.0]
    }

    /// Resolve a bus handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this catalogue.
    pub fn bus_by_id(&self, id: BusId) -> &Bus {
        &self.buses[id.0]
    }

    /// All stops in insertion order.
    pub fn stops(&self) -> impl Iterator<Item = (StopId, &Stop)> {
        self.stops.iter().enumerate().map(|(i, s)| (StopId(i), s))
    }

    /// All buses in insertion order.
    pub fn buses(&self) -> impl Iterator<Item = (BusId, &Bus)> {
        self.buses.iter().enumerate().map(|(i, b)| (BusId(i), b))
    }

    /// All buses ordered by name.
    pub fn buses_by_name(&self) -> impl Iterator<Item = &Bus> {
        self.sorted_buses.iter().map(|id| &self.buses[id.0])
    }

    /// Bus names in lexicographic order.
    pub fn bus_names(&self) -> impl Iterator<Item = &str> {
        self.buses_by_name().map(|b| b.name.as_str())
    }

    /// Explicit distance entries, sorted by (from, to).
    pub fn distances(&self) -> Vec<(StopId, StopId, u32)> {
        let mut entries: Vec<_> = self
            .distances
            .iter()
            .map(|(&(from, to), &d)| (from, to, d))
            .collect();
        entries.sort_unstable_by_key(|&(from, to, _)| (from, to));
        entries
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty() && self.buses.is_empty()
    }

    /// Rebuild a catalogue from records whose statistics are already known.
    ///
    /// Used by snapshot loading. Distances and curvature are taken as given;
    /// stop bus sets and the name indexes are derived from the records.
    /// Callers must have checked that every handle is in range.
    pub(crate) fn restore(
        stops: Vec<Stop>,
        buses: Vec<Bus>,
        distances: impl IntoIterator<Item = (StopId, StopId, u32)>,
    ) -> Self {
        let mut catalogue = Self::new();

        for stop in stops {
            let id = StopId(catalogue.stops.len());
            catalogue.stop_index.insert(stop.name.clone(), id);
            catalogue.stops.push(Stop::new(stop.name, stop.coordinates));
        }

        for (from, to, meters) in distances {
            catalogue.distances.insert((from, to), meters);
        }

        for bus in buses {
            if catalogue.bus_index.contains_key(&bus.name) {
                continue;
            }
            catalogue.insert_bus(bus);
        }

        catalogue
    }

    /// Store a bus, index it, and register it on every stop it visits.
    fn insert_bus(&mut self, bus: Bus) {
        let id = BusId(self.buses.len());

        for stop in &bus.stops {
            self.stops[stop.0].buses.insert(bus.name.clone());
        }

        let buses = &self.buses;
        let pos = self
            .sorted_buses
            .partition_point(|other| buses[other.0].name.as_str() < bus.name.as_str());
        self.sorted_buses.insert(pos, id);

        self.bus_index.insert(bus.name.clone(), id);
        self.buses.push(bus);
    }

    fn road_length(&self, stops: &[StopId]) -> u64 {
        stops
            .windows(2)
            .map(|pair| u64::from(self.distance(pair[0], pair[1])))
            .sum()
    }

    fn geo_length(&self, stops: &[StopId]) -> f64 {
        stops
            .windows(2)
            .map(|pair| {
                compute_distance(
                    self.stops[pair[0].0].coordinates,
                    self.stops[pair[1].0].coordinates,
                )
            })
            .sum()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coordinates() -> impl Strategy<Value = Coordinates> {
        (55.0f64..56.0, 37.0f64..38.0).prop_map(|(lat, lng)| Coordinates::new(lat, lng))
    }

    proptest! {
        /// Without explicit entries both directions give the rounded geodesic
        #[test]
        fn fallback_symmetric(a in coordinates(), b in coordinates()) {
            let mut catalogue = TransportCatalogue::new();
            let x = catalogue.add_stop("A", a);
            let y = catalogue.add_stop("B", b);
            let expected = compute_distance(a, b).round() as u32;
            prop_assert_eq!(catalogue.distance(x, y), expected);
            prop_assert_eq!(catalogue.distance(y, x), expected);
        }

        /// A one-directional entry answers both directions
        #[test]
        fn explicit_entry_answers_reverse(a in coordinates(), b in coordinates(), meters in 1u32..100_000) {
            let mut catalogue = TransportCatalogue::new();
            let x = catalogue.add_stop("A", a);
            let y = catalogue.add_stop("B", b);
            catalogue.add_distance("A", "B", meters).unwrap();
            prop_assert_eq!(catalogue.distance(x, y), meters);
            prop_assert_eq!(catalogue.distance(y, x), meters);
        }

        /// Road length of a linear route is twice the outbound leg
        #[test]
        fn linear_route_doubles(points in proptest::collection::vec(coordinates(), 2..6)) {
            let mut catalogue = TransportCatalogue::new();
            let names: Vec<String> = (0..points.len()).map(|i| format!("S{i}")).collect();
            for (name, point) in names.iter().zip(&points) {
                catalogue.add_stop(name.clone(), *point);
            }
            catalogue.add_bus("X", &names, false).unwrap();

            let ids: Vec<StopId> = names.iter().map(|n| catalogue.stop_id(n).unwrap()).collect();
            let outbound: u64 = ids.windows(2).map(|w| u64::from(catalogue.distance(w[0], w[1]))).sum();
            prop_assert_eq!(catalogue.bus("X").unwrap().distance, 2 * outbound);
        }
    }
}
