//! Stop records and their arena handle.

use std::collections::BTreeSet;
use std::fmt;

use super::Coordinates;

/// Stable handle to a stop owned by a [`TransportCatalogue`].
///
/// Stops are never removed, so a `StopId` stays valid for the lifetime of
/// the catalogue that issued it.
///
/// [`TransportCatalogue`]: crate::catalogue::TransportCatalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(pub usize);

impl StopId {
    /// Vertex where passengers wait to board at this stop.
    pub fn wait_vertex(self) -> usize {
        self.0 * 2
    }

    /// Vertex where passengers have boarded and are ready to ride.
    pub fn ride_vertex(self) -> usize {
        self.0 * 2 + 1
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named stop with coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    pub coordinates: Coordinates,
    /// Names of buses calling here, kept sorted.
    pub buses: BTreeSet<String>,
}

impl Stop {
    pub fn new(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            coordinates,
            buses: BTreeSet::new(),
        }
    }

    /// Returns true if at least one bus calls at this stop.
    pub fn is_served(&self) -> bool {
        !self.buses.is_empty()
    }
}
