//! Conversion from wire DTOs to domain types.
//!
//! This is the second decode stage. Each converter coerces every typed field
//! of its DTO and stops at the first failure, so a partially decoded entity
//! is never returned. Nested entities are converted with their own converter
//! and their errors are prefixed with the nested field's path.

use crate::domain::{
    Coordinates, Journey, JourneyLine, JourneyStop, Line, Message, Network, Route, RouteDetails,
    RouteStop, Stop, StopLine,
};

use super::coerce::{coerce_bool, coerce_duration, coerce_float, coerce_int, coerce_timestamp};
use super::error::DecodeError;
use super::types::{
    RawJourney, RawJourneyLine, RawJourneyStop, RawLine, RawMessage, RawRoute, RawRouteDetails,
    RawRouteStop, RawStop, RawStopLine,
};

/// Convert every item of a nested list, tagging failures with `field[i]`.
fn convert_all<R, T>(
    field: &str,
    items: &[R],
    convert: impl Fn(&R) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| convert(item).map_err(|e| e.within(&format!("{field}[{i}]"))))
        .collect()
}

/// Treat an empty wire string as absent.
fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

pub fn convert_message(raw: &RawMessage) -> Result<Message, DecodeError> {
    Ok(Message {
        content: raw.content.clone(),
    })
}

/// Convert a line.
pub fn convert_line(raw: &RawLine) -> Result<Line, DecodeError> {
    Ok(Line {
        id: raw.id.clone(),
        name: raw.name.clone(),
        short_name: raw.line_short_name.clone(),
        messages: convert_all("message", &raw.message, convert_message)?,
    })
}

fn convert_stop_line(raw: &RawStopLine) -> Result<StopLine, DecodeError> {
    match raw {
        RawStopLine::Line(line) => convert_line(line).map(StopLine::Line),
        RawStopLine::ShortCode(code) => Ok(StopLine::ShortCode(code.clone())),
    }
}

/// Convert a stop area.
///
/// Both coordinates must be valid decimal numbers; a stop is never placed
/// at a defaulted (0, 0).
pub fn convert_stop(raw: &RawStop) -> Result<Stop, DecodeError> {
    let longitude = coerce_float(&raw.x).map_err(|e| e.on_field("x"))?;
    let latitude = coerce_float(&raw.y).map_err(|e| e.on_field("y"))?;

    Ok(Stop {
        id: raw.id.clone(),
        name: raw.name.clone(),
        short_name: raw.line_short_name.clone(),
        coordinates: Coordinates {
            latitude,
            longitude,
        },
        lines: convert_all("line", &raw.line, convert_stop_line)?,
    })
}

/// Convert a route.
///
/// Every numeric and boolean field is mandatory: an unparseable length,
/// rank or stop count fails the route rather than decoding as zero.
pub fn convert_route(raw: &RawRoute) -> Result<Route, DecodeError> {
    let is_main = coerce_bool(&raw.is_main).map_err(|e| e.on_field("is_main"))?;
    let length = coerce_float(&raw.length).map_err(|e| e.on_field("length"))?;
    let rank = coerce_int(&raw.rank).map_err(|e| e.on_field("rank"))?;
    let rank_is_odd = coerce_bool(&raw.rank_is_odd).map_err(|e| e.on_field("rank_is_odd"))?;
    let stop_count = coerce_int(&raw.stops_number).map_err(|e| e.on_field("stops_number"))?;
    let wayback = coerce_bool(&raw.wayback).map_err(|e| e.on_field("wayback"))?;

    Ok(Route {
        id: raw.roid.clone(),
        name: raw.name.clone(),
        origin_city: raw.origin_city_name.clone(),
        origin_stop_name: raw.origin_stop_name.clone(),
        destination_city: raw.destination_city_name.clone(),
        destination_stop_name: raw.destination_stop_name.clone(),
        direction: raw.direction.clone(),
        is_main,
        length,
        rank,
        rank_is_odd,
        stop_count,
        wayback,
    })
}

fn convert_route_stop(raw: &RawRouteStop) -> Result<RouteStop, DecodeError> {
    Ok(RouteStop {
        id: raw.id.clone(),
        area_name: raw.area_name.clone(),
    })
}

/// Convert route details.
pub fn convert_route_details(raw: &RawRouteDetails) -> Result<RouteDetails, DecodeError> {
    let wayback = coerce_bool(&raw.wayback).map_err(|e| e.on_field("wayback"))?;

    Ok(RouteDetails {
        line_id: raw.line_id.clone(),
        line_short_name: raw.line_short_name.clone(),
        stops: convert_all("stop", &raw.stop, convert_route_stop)?,
        wayback,
    })
}

fn convert_journey_stop(raw: &RawJourneyStop) -> Result<JourneyStop, DecodeError> {
    Ok(JourneyStop {
        id: raw.id.clone(),
        name: raw.name.clone(),
    })
}

fn convert_journey_line(raw: &RawJourneyLine) -> Result<JourneyLine, DecodeError> {
    Ok(JourneyLine {
        id: raw.id.clone(),
        name: raw.name.clone(),
        short_name: raw.line_short_name.clone(),
    })
}

/// Convert a departure.
///
/// The departure timestamp and the three flags are mandatory. Track,
/// network and waiting time are optional, but a waiting time that is
/// present must be a well-formed `HH:MM:SS` duration.
pub fn convert_journey(raw: &RawJourney) -> Result<Journey, DecodeError> {
    let departure = coerce_timestamp(&raw.date_time).map_err(|e| e.on_field("date_time"))?;
    let wayback = coerce_bool(&raw.wayback).map_err(|e| e.on_field("wayback"))?;
    let accessible = coerce_bool(&raw.accessibility).map_err(|e| e.on_field("accessibility"))?;
    let realtime = coerce_bool(&raw.realtime).map_err(|e| e.on_field("realtime"))?;

    let waiting_time = match raw.waiting_time.as_str() {
        "" => None,
        s => Some(coerce_duration(s).map_err(|e| e.on_field("waiting_time"))?),
    };

    let network = if raw.network_id.is_empty() && raw.network_name.is_empty() {
        None
    } else {
        Some(Network {
            id: raw.network_id.clone(),
            name: raw.network_name.clone(),
        })
    };

    let stops = convert_all("stop", &raw.stop, convert_journey_stop)?;
    let messages = convert_all("message", &raw.message, convert_message)?;
    let lines = convert_all("line", &raw.line, convert_journey_line)?;

    Ok(Journey {
        departure,
        route_id: raw.roid.clone(),
        wayback,
        accessible,
        realtime,
        track: non_empty(&raw.track),
        stops,
        messages,
        lines,
        network,
        waiting_time,
    })
}
