//! Loosely-typed wire DTOs.
//!
//! This is the first decode stage. Every leaf is captured as text, whatever
//! JSON kind the API happened to use for it, and every missing field falls
//! back to an empty string or empty list. Nothing here judges whether a value
//! makes sense; that is left to [`super::convert`].

use std::fmt;

use serde::Deserialize;
use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde_json::{Map, Value};

use super::coerce::bool_to_wire;
use super::error::DecodeError;

/// Run the first decode stage on a single JSON value.
///
/// Fails with a structural mismatch when a field has the wrong JSON kind,
/// e.g. an object where a list is expected. The error's path names the
/// offending field relative to `value`, such as `stop` or `line[1].name`.
pub fn read<T: DeserializeOwned>(value: &Value) -> Result<T, DecodeError> {
    T::deserialize(value).map_err(|e| {
        let path = locate(value, &|candidate: Value| T::deserialize(&candidate).is_err());
        DecodeError::mismatch(path, e)
    })
}

/// Find the node of `value` that makes deserialization fail.
///
/// `fails` reports whether a replacement for the current node still breaks
/// the enclosing record. Every DTO field is optional, so a record holding
/// one field alone decodes unless that field is the broken one.
fn locate(value: &Value, fails: &dyn Fn(Value) -> bool) -> String {
    match value {
        Value::Object(fields) if !fails(Value::Object(Map::new())) => {
            for (name, field) in fields {
                let field_fails = |candidate: Value| {
                    fails(Value::Object(Map::from_iter([(name.clone(), candidate)])))
                };
                if field_fails(field.clone()) {
                    return join_segment(name.clone(), locate(field, &field_fails));
                }
            }
            String::new()
        }
        Value::Array(items) if !fails(Value::Array(Vec::new())) => {
            for (i, item) in items.iter().enumerate() {
                let item_fails = |candidate: Value| fails(Value::Array(vec![candidate]));
                if item_fails(item.clone()) {
                    return join_segment(format!("[{i}]"), locate(item, &item_fails));
                }
            }
            String::new()
        }
        _ => String::new(),
    }
}

fn join_segment(head: String, rest: String) -> String {
    if rest.is_empty() {
        head
    } else if rest.starts_with('[') {
        head + &rest
    } else {
        format!("{head}.{rest}")
    }
}

/// Name of a JSON value's kind, for error messages.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Deserialize any JSON scalar as text.
///
/// Strings pass through, numbers keep their decimal form, booleans become
/// the API's `"1"`/`"0"` digits and `null` becomes the empty string.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(bool_to_wire(v).to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

/// Deserialize a JSON array, treating `null` as empty.
fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A rider message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMessage {
    #[serde(default, deserialize_with = "text")]
    pub content: String,
}

/// A line, from `LinesList` or nested in a stop area.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLine {
    #[serde(default, deserialize_with = "text")]
    pub id: String,

    #[serde(default, deserialize_with = "text")]
    pub name: String,

    #[serde(default, deserialize_with = "text")]
    pub line_short_name: String,

    #[serde(default, deserialize_with = "list")]
    pub message: Vec<RawMessage>,
}

/// A line entry inside a stop area: either a full line or a bare short code.
#[derive(Debug, Clone)]
pub enum RawStopLine {
    Line(RawLine),
    ShortCode(String),
}

impl<'de> Deserialize<'de> for RawStopLine {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(code) => Ok(RawStopLine::ShortCode(code)),
            value @ Value::Object(_) => RawLine::deserialize(value)
                .map(RawStopLine::Line)
                .map_err(de::Error::custom),
            other => Err(de::Error::custom(format_args!(
                "expected a line object or a short-code string, found {}",
                kind(&other)
            ))),
        }
    }
}

/// A stop area, from `StopAreasList`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStop {
    #[serde(default, deserialize_with = "text")]
    pub id: String,

    #[serde(default, deserialize_with = "text")]
    pub name: String,

    #[serde(default, deserialize_with = "text")]
    pub line_short_name: String,

    /// Longitude.
    #[serde(default, deserialize_with = "text")]
    pub x: String,

    /// Latitude.
    #[serde(default, deserialize_with = "text")]
    pub y: String,

    #[serde(default, deserialize_with = "list")]
    pub line: Vec<RawStopLine>,
}

/// A route, from `RoutesList`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRoute {
    #[serde(default, deserialize_with = "text")]
    pub destination_city_name: String,

    #[serde(default, deserialize_with = "text")]
    pub destination_stop_name: String,

    #[serde(default, deserialize_with = "text")]
    pub direction: String,

    #[serde(default, deserialize_with = "text")]
    pub is_main: String,

    #[serde(default, deserialize_with = "text")]
    pub length: String,

    #[serde(default, deserialize_with = "text")]
    pub name: String,

    #[serde(default, deserialize_with = "text")]
    pub origin_city_name: String,

    #[serde(default, deserialize_with = "text")]
    pub origin_stop_name: String,

    #[serde(default, deserialize_with = "text")]
    pub rank: String,

    #[serde(default, deserialize_with = "text")]
    pub rank_is_odd: String,

    #[serde(default, deserialize_with = "text")]
    pub roid: String,

    #[serde(default, deserialize_with = "text")]
    pub stops_number: String,

    #[serde(default, deserialize_with = "text")]
    pub wayback: String,
}

/// A stop listed in route details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRouteStop {
    #[serde(default, deserialize_with = "text")]
    pub id: String,

    #[serde(default, deserialize_with = "text")]
    pub area_name: String,
}

/// Route details, from `RouteDetails`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRouteDetails {
    #[serde(default, deserialize_with = "text")]
    pub line_id: String,

    #[serde(default, deserialize_with = "text")]
    pub line_short_name: String,

    #[serde(default, deserialize_with = "list")]
    pub stop: Vec<RawRouteStop>,

    #[serde(default, deserialize_with = "text")]
    pub wayback: String,
}

/// An upcoming stop of a journey.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJourneyStop {
    #[serde(default, deserialize_with = "text")]
    pub id: String,

    #[serde(default, deserialize_with = "text")]
    pub name: String,
}

/// A line operating a journey.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJourneyLine {
    #[serde(default, deserialize_with = "text")]
    pub id: String,

    #[serde(default, deserialize_with = "text")]
    pub name: String,

    #[serde(default, deserialize_with = "text")]
    pub line_short_name: String,
}

/// A departure, from `LineStopDeparturesList`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJourney {
    /// "YYYY-MM-DD HH:MM:SS"
    #[serde(default, deserialize_with = "text")]
    pub date_time: String,

    #[serde(default, deserialize_with = "text")]
    pub roid: String,

    #[serde(default, deserialize_with = "text")]
    pub wayback: String,

    #[serde(default, deserialize_with = "text")]
    pub accessibility: String,

    #[serde(default, deserialize_with = "text")]
    pub realtime: String,

    #[serde(default, deserialize_with = "text")]
    pub track: String,

    #[serde(default, deserialize_with = "list")]
    pub stop: Vec<RawJourneyStop>,

    #[serde(default, deserialize_with = "list")]
    pub message: Vec<RawMessage>,

    #[serde(default, deserialize_with = "list")]
    pub line: Vec<RawJourneyLine>,

    #[serde(default, deserialize_with = "text")]
    pub network_id: String,

    #[serde(default, deserialize_with = "text")]
    pub network_name: String,

    /// "HH:MM:SS", empty when the API has no estimate.
    #[serde(default, deserialize_with = "text")]
    pub waiting_time: String,
}
