//! Stop area types.

use serde::Serialize;

use super::Line;

/// A point on the map, in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f32,
    pub longitude: f32,
}

/// A line served at a stop.
///
/// Depending on the API generation, a stop lists either full line objects
/// or just their short codes. Each entry keeps whichever form was sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StopLine {
    Line(Line),
    ShortCode(String),
}

impl StopLine {
    /// The line's short code, whichever form the API used.
    pub fn short_name(&self) -> &str {
        match self {
            StopLine::Line(line) => &line.short_name,
            StopLine::ShortCode(code) => code,
        }
    }
}

/// A stop area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub coordinates: Coordinates,
    /// Lines calling at this stop, in API order.
    pub lines: Vec<StopLine>,
}

impl Stop {
    pub fn latitude(&self) -> f32 {
        self.coordinates.latitude
    }

    pub fn longitude(&self) -> f32 {
        self.coordinates.longitude
    }

    /// Short codes of every line at this stop.
    pub fn line_short_names(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(StopLine::short_name)
    }
}
