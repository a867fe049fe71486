//! Transport catalogue.
//!
//! Ingests bus stops, road distances and bus routes, answers statistics and
//! fastest-itinerary queries, renders the network as an SVG map, and stores
//! the whole prepared state in a binary snapshot so queries can be served
//! without rebuilding it.

pub mod catalogue;
pub mod domain;
pub mod graph;
pub mod render;
pub mod requests;
pub mod router;
pub mod snapshot;
