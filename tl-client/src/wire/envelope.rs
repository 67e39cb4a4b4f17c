//! Response envelope decoding.
//!
//! Every API response wraps its payload one level deep, e.g.
//! `{"lines": {"line": [...]}}`. The functions here parse the raw body,
//! walk to the payload, and hand each element to the matching converter.
//! Any failure aborts the whole decode; no partial collection is returned.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::domain::{Journey, Line, Route, RouteDetails, Stop};

use super::convert::{
    convert_journey, convert_line, convert_route, convert_route_details, convert_stop,
};
use super::error::DecodeError;
use super::types::{RawRouteDetails, kind, read};

/// The response schemas the API produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schema {
    Lines,
    Stops,
    Routes,
    RouteDetails,
    Journeys,
}

impl Schema {
    /// The (outer, inner) keys leading to this schema's payload.
    pub fn path(self) -> (&'static str, &'static str) {
        match self {
            Schema::Lines => ("lines", "line"),
            Schema::Stops => ("stopAreas", "stopArea"),
            Schema::Routes => ("routes", "routes"),
            Schema::RouteDetails => ("routeDetails", "route"),
            Schema::Journeys => ("journeys", "journey"),
        }
    }
}

/// A decoded response of any schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Decoded {
    Lines(Vec<Line>),
    Stops(Vec<Stop>),
    Routes(Vec<Route>),
    RouteDetails(RouteDetails),
    Journeys(Vec<Journey>),
}

impl Decoded {
    /// Number of top-level entities decoded.
    pub fn len(&self) -> usize {
        match self {
            Decoded::Lines(v) => v.len(),
            Decoded::Stops(v) => v.len(),
            Decoded::Routes(v) => v.len(),
            Decoded::RouteDetails(_) => 1,
            Decoded::Journeys(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decode a response body according to `schema`.
pub fn decode(schema: Schema, body: &[u8]) -> Result<Decoded, DecodeError> {
    match schema {
        Schema::Lines => decode_lines(body).map(Decoded::Lines),
        Schema::Stops => decode_stops(body).map(Decoded::Stops),
        Schema::Routes => decode_routes(body).map(Decoded::Routes),
        Schema::RouteDetails => decode_route_details(body).map(Decoded::RouteDetails),
        Schema::Journeys => decode_journeys(body).map(Decoded::Journeys),
    }
}

/// Decode a `LinesList` response.
pub fn decode_lines(body: &[u8]) -> Result<Vec<Line>, DecodeError> {
    decode_list(Schema::Lines, body, convert_line)
}

/// Decode a `StopAreasList` response.
pub fn decode_stops(body: &[u8]) -> Result<Vec<Stop>, DecodeError> {
    decode_list(Schema::Stops, body, convert_stop)
}

/// Decode a `RoutesList` response.
pub fn decode_routes(body: &[u8]) -> Result<Vec<Route>, DecodeError> {
    decode_list(Schema::Routes, body, convert_route)
}

/// Decode a `LineStopDeparturesList` response.
pub fn decode_journeys(body: &[u8]) -> Result<Vec<Journey>, DecodeError> {
    decode_list(Schema::Journeys, body, convert_journey)
}

/// Decode a `RouteDetails` response, which wraps a single object.
pub fn decode_route_details(body: &[u8]) -> Result<RouteDetails, DecodeError> {
    let (outer, inner) = Schema::RouteDetails.path();
    let root = parse_body(body)?;
    let wrapper = open_envelope(&root, outer)?;

    let value = match wrapper.get(inner) {
        None | Some(Value::Null) => {
            return Err(DecodeError::malformed(format_args!(
                "missing `{outer}.{inner}` object"
            )));
        }
        Some(value @ Value::Object(_)) => value,
        Some(other) => {
            return Err(DecodeError::mismatch(
                format!("{outer}.{inner}"),
                format_args!("expected an object, found {}", kind(other)),
            ));
        }
    };

    let raw: RawRouteDetails = read(value).map_err(|e| e.within(&format!("{outer}.{inner}")))?;
    convert_route_details(&raw).map_err(|e| e.within(&format!("{outer}.{inner}")))
}

/// Parse a response body into a JSON tree.
pub fn parse_body(body: &[u8]) -> Result<Value, DecodeError> {
    serde_json::from_slice(body).map_err(DecodeError::malformed)
}

/// Check the root is an object holding an object under `outer`.
fn open_envelope<'a>(
    root: &'a Value,
    outer: &str,
) -> Result<&'a serde_json::Map<String, Value>, DecodeError> {
    let Some(root) = root.as_object() else {
        return Err(DecodeError::malformed(format_args!(
            "expected a JSON object at top level, found {}",
            kind(root)
        )));
    };

    match root.get(outer) {
        Some(Value::Object(wrapper)) => Ok(wrapper),
        Some(other) => Err(DecodeError::malformed(format_args!(
            "expected an object under `{outer}`, found {}",
            kind(other)
        ))),
        None => Err(DecodeError::malformed(format_args!(
            "missing `{outer}` envelope"
        ))),
    }
}

/// Walk to the payload array and decode each element in order.
fn decode_list<R, T>(
    schema: Schema,
    body: &[u8],
    convert: impl Fn(&R) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError>
where
    R: DeserializeOwned,
{
    let (outer, inner) = schema.path();
    let root = parse_body(body)?;
    let wrapper = open_envelope(&root, outer)?;

    let items: &[Value] = match wrapper.get(inner) {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(DecodeError::mismatch(
                format!("{outer}.{inner}"),
                format_args!("expected an array, found {}", kind(other)),
            ));
        }
    };

    let decoded = items
        .iter()
        .enumerate()
        .map(|(i, value)| {
            read::<R>(value)
                .and_then(|raw| convert(&raw))
                .map_err(|e| e.within(&format!("{outer}.{inner}[{i}]")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(?schema, count = decoded.len(), "decoded response");

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::domain::StopLine;

    use super::*;

    const LINES: &[u8] = include_bytes!("../../samples/line_request.json");
    const STOPS: &[u8] = include_bytes!("../../samples/stop_request.json");
    const ROUTES: &[u8] = include_bytes!("../../samples/route_request.json");
    const ROUTE_DETAILS: &[u8] = include_bytes!("../../samples/route_details.json");
    const DEPARTURES: &[u8] = include_bytes!("../../samples/next_departure.json");

    #[test]
    fn decode_sample_lines() {
        let lines = decode_lines(LINES).unwrap();

        assert_eq!(lines.len(), 2);

        let first = &lines[0];
        assert_eq!(first.id, "11822125115506799");
        assert_eq!(first.name, "Lausanne-Flon - Bercher");
        assert_eq!(first.short_name, "LEB");
        assert_eq!(first.messages.len(), 1);
    }

    #[test]
    fn decode_minimal_line() {
        let body = br#"{"lines":{"line":[{"id":"1","name":"Lausanne-Flon - Bercher","line_short_name":"LEB","message":[{"content":"x"}]}]}}"#;

        let lines = decode_lines(body).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, "1");
        assert_eq!(lines[0].name, "Lausanne-Flon - Bercher");
        assert_eq!(lines[0].short_name, "LEB");
        assert_eq!(lines[0].messages[0].content, "x");
    }

    #[test]
    fn decode_sample_stops() {
        let stops = decode_stops(STOPS).unwrap();

        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0].name, "Lausanne-Flon");
        assert_eq!(stops[0].latitude(), 46.52_f32);
        assert_eq!(stops[0].longitude(), 6.63_f32);
        assert!(matches!(stops[0].lines[0], StopLine::Line(_)));
        assert_eq!(stops[1].lines[0], StopLine::ShortCode("m2".into()));
        assert!(stops[2].lines.is_empty());
    }

    #[test]
    fn stop_with_bad_coordinate_reports_full_path() {
        let body = br#"{"stopAreas":{"stopArea":[
            {"id":"1","name":"Flon","x":"6.63","y":"46.52"},
            {"id":"2","name":"Ouchy","x":"abc","y":"46.50"}
        ]}}"#;

        let err = decode_stops(body).unwrap_err();

        assert_eq!(
            err,
            DecodeError::FieldCoercion {
                field: "stopAreas.stopArea[1].x".into(),
                raw: "abc".into(),
                expected: "a decimal number",
            }
        );
    }

    #[test]
    fn decode_sample_routes() {
        let routes = decode_routes(ROUTES).unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].rank, 3);
        assert!(routes[0].is_main);
        assert!(!routes[0].wayback);
        assert!(routes[1].wayback);
    }

    #[test]
    fn route_with_empty_rank_fails_whole_list() {
        let body = br#"{"routes":{"routes":[
            {"roid":"1","is_main":"1","length":"5.9","rank":"3","rank_is_odd":"1","stops_number":"14","wayback":"0"},
            {"roid":"2","is_main":"1","length":"5.9","rank":"","rank_is_odd":"1","stops_number":"14","wayback":"1"}
        ]}}"#;

        let err = decode_routes(body).unwrap_err();
        assert_eq!(err.path(), Some("routes.routes[1].rank"));
    }

    #[test]
    fn decode_sample_route_details() {
        let details = decode_route_details(ROUTE_DETAILS).unwrap();

        assert_eq!(details.line_short_name, "m2");
        assert_eq!(details.stops.len(), 4);
        assert_eq!(details.stops[0].area_name, "Ouchy-Olympique");
        assert!(!details.wayback);
    }

    #[test]
    fn route_details_missing_object_is_malformed() {
        let err = decode_route_details(br#"{"routeDetails":{}}"#).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPayload { .. }));
    }

    #[test]
    fn route_details_array_is_mismatch() {
        let err = decode_route_details(br#"{"routeDetails":{"route":[]}}"#).unwrap_err();
        assert_eq!(err.path(), Some("routeDetails.route"));
    }

    #[test]
    fn decode_sample_journeys() {
        let journeys = decode_journeys(DEPARTURES).unwrap();

        assert_eq!(journeys.len(), 3);

        let first = &journeys[0];
        assert_eq!(first.waiting_time, Some(Duration::from_secs(12 * 60 + 27)));
        assert!(first.realtime);
        assert_eq!(first.stops.len(), 3);
        assert_eq!(first.lines[0].short_name, "m2");
        assert_eq!(first.network.as_ref().map(|n| n.name.as_str()), Some("tl"));

        let last = &journeys[2];
        assert_eq!(last.waiting_time, None);
        assert_eq!(last.track.as_deref(), Some("2"));
    }

    #[test]
    fn negative_waiting_time_is_fatal() {
        let body = br#"{"journeys":{"journey":[
            {"date_time":"2018-12-07 14:22:00","wayback":"0","accessibility":"1","realtime":"1","waiting_time":"-1:07"}
        ]}}"#;

        let err = decode_journeys(body).unwrap_err();
        assert_eq!(err.path(), Some("journeys.journey[0].waiting_time"));
    }

    #[test]
    fn absent_list_is_empty() {
        assert!(decode_lines(br#"{"lines":{}}"#).unwrap().is_empty());
        assert!(decode_journeys(br#"{"journeys":{"journey":null}}"#).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = decode_lines(b"{\"lines\":").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPayload { .. }));
    }

    #[test]
    fn wrong_top_level_shape_is_malformed() {
        let bodies: [&[u8]; 4] = [b"[]", b"{\"stops\":{}}", b"{\"lines\":[]}", b"\"lines\""];
        for body in bodies {
            let err = decode_lines(body).unwrap_err();
            assert!(
                matches!(err, DecodeError::MalformedPayload { .. }),
                "unexpected {err:?}"
            );
        }
    }

    #[test]
    fn object_instead_of_array_is_mismatch() {
        let err = decode_lines(br#"{"lines":{"line":{"id":"1"}}}"#).unwrap_err();

        assert_eq!(
            err,
            DecodeError::StructuralMismatch {
                path: "lines.line".into(),
                detail: "expected an array, found an object".into(),
            }
        );
    }

    #[test]
    fn nested_object_instead_of_array_is_mismatch() {
        let body = br#"{"lines":{"line":[{"id":"1","message":{"content":"x"}}]}}"#;

        let err = decode_lines(body).unwrap_err();

        assert!(matches!(err, DecodeError::StructuralMismatch { .. }));
        assert_eq!(err.path(), Some("lines.line[0].message"));
    }

    #[test]
    fn journey_stops_as_object_name_the_field() {
        let body = br#"{"journeys":{"journey":[{
            "date_time": "2018-12-07 14:22:00",
            "stop": {"id": "1"}
        }]}}"#;

        let err = decode_journeys(body).unwrap_err();

        assert!(matches!(err, DecodeError::StructuralMismatch { .. }));
        assert_eq!(err.path(), Some("journeys.journey[0].stop"));
    }

    #[test]
    fn decode_by_schema() {
        assert_eq!(decode(Schema::Lines, LINES).unwrap().len(), 2);
        assert_eq!(decode(Schema::Stops, STOPS).unwrap().len(), 3);
        assert_eq!(decode(Schema::Routes, ROUTES).unwrap().len(), 2);
        assert_eq!(decode(Schema::RouteDetails, ROUTE_DETAILS).unwrap().len(), 1);
        assert_eq!(decode(Schema::Journeys, DEPARTURES).unwrap().len(), 3);
    }

    #[test]
    fn decoding_is_repeatable() {
        let first = decode(Schema::Journeys, DEPARTURES).unwrap();
        let second = decode(Schema::Journeys, DEPARTURES).unwrap();
        assert_eq!(first, second);

        let first = decode(Schema::Stops, STOPS).unwrap();
        let second = decode(Schema::Stops, STOPS).unwrap();
        assert_eq!(first, second);
    }
}
