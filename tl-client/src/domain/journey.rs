//! Departure ("journey") types.

use std::time::Duration;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::Message;

/// A stop still to be served by a departing vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyStop {
    pub id: String,
    pub name: String,
}

/// Summary of a line operating a journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyLine {
    pub id: String,
    pub name: String,
    pub short_name: String,
}

/// Operating network of a journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Network {
    pub id: String,
    pub name: String,
}

/// A scheduled or real-time departure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Journey {
    /// Departure time, naive local time as reported by the API.
    pub departure: NaiveDateTime,
    pub route_id: String,
    pub wayback: bool,
    /// Whether the vehicle is step-free accessible.
    pub accessible: bool,
    /// Whether `departure` comes from live vehicle tracking.
    pub realtime: bool,
    /// Track or platform indicator, if the stop has one.
    pub track: Option<String>,
    /// Upcoming stops, in calling order.
    pub stops: Vec<JourneyStop>,
    pub messages: Vec<Message>,
    pub lines: Vec<JourneyLine>,
    pub network: Option<Network>,
    /// Time left until departure, relative to when the API answered.
    pub waiting_time: Option<Duration>,
}

impl Journey {
    /// Names of the upcoming stops, in calling order.
    pub fn stop_names(&self) -> impl Iterator<Item = &str> {
        self.stops.iter().map(|s| s.name.as_str())
    }

    /// Whole minutes left until departure, rounded down.
    pub fn waiting_minutes(&self) -> Option<u64> {
        self.waiting_time.map(|d| d.as_secs() / 60)
    }
}
