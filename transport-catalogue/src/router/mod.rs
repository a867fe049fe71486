//! Shortest-itinerary routing over the catalogue.
//!
//! The phases are separate types. A [`RouteGraphBuilder`] holds validated
//! settings and is consumed by `build`, producing a [`RouteGraph`]; a
//! snapshot can also yield a `RouteGraph` directly. A [`TransportRouter`]
//! can only be created from a `RouteGraph`, so no query can run against a
//! graph that was never built.

mod config;
mod error;
mod route_graph;
mod transport_router;

pub use config::RoutingSettings;
pub use error::RouterError;
pub use route_graph::{EdgeInfo, RouteGraph, RouteGraphBuilder};
pub use transport_router::{Itinerary, ItineraryLine, TransportRouter};
