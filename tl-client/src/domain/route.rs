//! Route types.

use serde::Serialize;

/// A route (one direction of a line between two terminal stops).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Route identifier (`roid` on the wire).
    pub id: String,
    pub name: String,
    pub origin_city: String,
    pub origin_stop_name: String,
    pub destination_city: String,
    pub destination_stop_name: String,
    /// Direction marker as sent by the API (e.g. "A" or "R").
    pub direction: String,
    /// Whether this is the line's main route.
    pub is_main: bool,
    /// Route length, in the API's unit.
    pub length: f32,
    pub rank: i64,
    pub rank_is_odd: bool,
    /// Number of stops served.
    pub stop_count: i64,
    /// Whether this is the return direction.
    pub wayback: bool,
}

/// One stop along a route, as listed in route details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteStop {
    pub id: String,
    pub area_name: String,
}

/// The ordered stops of a single route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDetails {
    pub line_id: String,
    pub line_short_name: String,
    pub stops: Vec<RouteStop>,
    pub wayback: bool,
}
