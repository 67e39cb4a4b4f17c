//! API endpoints and their request paths.

use chrono::NaiveDateTime;

use crate::wire::{Schema, bool_to_wire};

/// Which configured host serves an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    Base,
    NewApi,
}

/// One logical API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// All active lines.
    Lines,
    /// All stop areas.
    Stops,
    /// Routes of a line.
    Routes { line_id: String },
    /// Stops along a route.
    RouteDetails { route_id: String },
    /// Next departures of a line on a route, from `date` onwards.
    Departures {
        route_id: String,
        line_id: String,
        date: NaiveDateTime,
        wayback: bool,
    },
}

impl Endpoint {
    /// The response schema this endpoint returns.
    pub fn schema(&self) -> Schema {
        match self {
            Endpoint::Lines => Schema::Lines,
            Endpoint::Stops => Schema::Stops,
            Endpoint::Routes { .. } => Schema::Routes,
            Endpoint::RouteDetails { .. } => Schema::RouteDetails,
            Endpoint::Departures { .. } => Schema::Journeys,
        }
    }

    pub fn host(&self) -> Host {
        match self {
            Endpoint::RouteDetails { .. } => Host::NewApi,
            _ => Host::Base,
        }
    }

    /// Path and query, relative to the host.
    ///
    /// # Examples
    ///
    /// ```
    /// use tl_client::client::Endpoint;
    ///
    /// let endpoint = Endpoint::Routes { line_id: "11821953316814862".into() };
    /// assert_eq!(endpoint.path(), "apps/RoutesList?lineid=11821953316814862");
    /// ```
    pub fn path(&self) -> String {
        match self {
            Endpoint::Lines => "apps/LinesList".to_string(),
            Endpoint::Stops => "apps/StopAreasList".to_string(),
            Endpoint::Routes { line_id } => {
                with_query("apps/RoutesList", &[("lineid", line_id.as_str())])
            }
            Endpoint::RouteDetails { route_id } => {
                with_query("apps/RouteDetails", &[("roid", route_id.as_str())])
            }
            Endpoint::Departures {
                route_id,
                line_id,
                date,
                wayback,
            } => {
                let date = date.format("%Y-%m-%d %H:%M").to_string();
                with_query(
                    "apps/LineStopDeparturesList",
                    &[
                        ("date", date.as_str()),
                        ("lineid", line_id.as_str()),
                        ("roid", route_id.as_str()),
                        ("wayback", bool_to_wire(*wayback)),
                    ],
                )
            }
        }
    }
}

fn with_query(path: &str, pairs: &[(&str, &str)]) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("{path}?{query}")
}
