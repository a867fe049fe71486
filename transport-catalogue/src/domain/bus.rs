//! Bus records and their arena handle.

use std::fmt;

use super::StopId;

/// Stable handle to a bus owned by a [`TransportCatalogue`].
///
/// [`TransportCatalogue`]: crate::catalogue::TransportCatalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BusId(pub usize);

impl fmt::Display for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named bus route.
///
/// `stops` is the full traversal. For a linear route it holds the outbound
/// stops followed by the way back, so `A, B, C` is stored as
/// `A, B, C, B, A`. Ring routes are stored as given.
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    pub name: String,
    pub stops: Vec<StopId>,
    pub is_ring: bool,
    /// Number of distinct stops visited.
    pub unique_stops: usize,
    /// Road distance along `stops`, in meters.
    pub distance: u64,
    /// Road distance divided by geodesic length of the same sequence.
    pub curvature: f64,
}

impl Bus {
    /// Number of stops in the stored traversal.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// The stop where a linear route turns back.
    ///
    /// Returns `None` for ring routes and empty routes.
    pub fn turnaround(&self) -> Option<StopId> {
        if self.is_ring {
            return None;
        }
        self.stops.get(self.stops.len() / 2).copied()
    }
}

/// Expands the stops of a linear route into its full traversal.
///
/// Ring routes are returned unchanged.
pub fn expand_route(mut stops: Vec<StopId>, is_ring: bool) -> Vec<StopId> {
    if is_ring || stops.len() < 2 {
        return stops;
    }
    let back: Vec<StopId> = stops[..stops.len() - 1].iter().rev().copied().collect();
    stops.extend(back);
    stops
}
