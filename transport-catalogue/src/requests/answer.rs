//! JSON answers to stat requests.

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Message carried by every unsuccessful answer.
pub const NOT_FOUND: &str = "not found";

/// Answer to a single stat request.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Unknown bus or stop, or no route between the stops.
    NotFound { request_id: i64 },

    Stop {
        request_id: i64,
        /// Names of buses through the stop, sorted.
        buses: Vec<String>,
    },

    Bus {
        request_id: i64,
        curvature: f64,
        route_length: u64,
        stop_count: usize,
        unique_stop_count: usize,
    },

    Map { request_id: i64, map: String },

    Route {
        request_id: i64,
        total_time: f64,
        items: Vec<RouteItem>,
    },
}

impl Answer {
    pub fn request_id(&self) -> i64 {
        match self {
            Answer::NotFound { request_id }
            | Answer::Stop { request_id, .. }
            | Answer::Bus { request_id, .. }
            | Answer::Map { request_id, .. }
            | Answer::Route { request_id, .. } => *request_id,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Answer::NotFound { .. })
    }
}

/// One step of a route answer.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type")]
pub enum RouteItem {
    Wait { stop_name: String, time: f64 },
    Bus { bus: String, span_count: usize, time: f64 },
}

impl Serialize for Answer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Answer::NotFound { request_id } => {
                let mut s = serializer.serialize_struct("Answer", 2)?;
                s.serialize_field("request_id", request_id)?;
                s.serialize_field("error_message", NOT_FOUND)?;
                s.end()
            }
            Answer::Stop { request_id, buses } => {
                let mut s = serializer.serialize_struct("Answer", 2)?;
                s.serialize_field("request_id", request_id)?;
                s.serialize_field("buses", buses)?;
                s.end()
            }
            Answer::Bus {
                request_id,
                curvature,
                route_length,
                stop_count,
                unique_stop_count,
            } => {
                let mut s = serializer.serialize_struct("Answer", 5)?;
                s.serialize_field("request_id", request_id)?;
                s.serialize_field("curvature", curvature)?;
                s.serialize_field("route_length", route_length)?;
                s.serialize_field("stop_count", stop_count)?;
                s.serialize_field("unique_stop_count", unique_stop_count)?;
                s.end()
            }
            Answer::Map { request_id, map } => {
                let mut s = serializer.serialize_struct("Answer", 2)?;
                s.serialize_field("request_id", request_id)?;
                s.serialize_field("map", map)?;
                s.end()
            }
            Answer::Route {
                request_id,
                total_time,
                items,
            } => {
                let mut s = serializer.serialize_struct("Answer", 3)?;
                s.serialize_field("request_id", request_id)?;
                s.serialize_field("total_time", total_time)?;
                s.serialize_field("items", items)?;
                s.end()
            }
        }
    }
}
