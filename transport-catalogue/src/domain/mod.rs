//! Domain types for the transport catalogue.
//!
//! Stops and buses live in the catalogue's arenas and refer to each other
//! through index handles, so records never need to move or be re-linked.

mod bus;
mod geo;
mod stop;

pub use bus::{Bus, BusId, expand_route};
pub use geo::{COORDINATE_EPSILON, Coordinates, compute_distance};
pub use stop::{Stop, StopId};
