//! The t-l operations, shared by every response source.

use chrono::NaiveDateTime;
use tracing::warn;

use crate::domain::{Journey, Line, Route, RouteDetails, Stop};
use crate::wire::{
    DecodeError, Decoded, decode, decode_journeys, decode_lines, decode_route_details,
    decode_routes, decode_stops,
};

use super::endpoint::Endpoint;
use super::error::TlError;

/// Trait for fetching t-l response bodies.
///
/// Implementors only move bytes. The typed operations decode the body with
/// the endpoint's schema, so [`super::TlClient`] and [`super::MockTlClient`]
/// decode identically.
#[allow(async_fn_in_trait)]
pub trait TlApi {
    /// Fetch the raw response body for an endpoint.
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Vec<u8>, TlError>;

    /// Fetch an endpoint and decode it with the endpoint's schema.
    async fn get(&self, endpoint: &Endpoint) -> Result<Decoded, TlError> {
        let body = self.fetch(endpoint).await?;
        let schema = endpoint.schema();
        decode_response(endpoint, &body, |b| decode(schema, b))
    }

    /// Fetch all active lines.
    async fn list_lines(&self) -> Result<Vec<Line>, TlError> {
        let endpoint = Endpoint::Lines;
        let body = self.fetch(&endpoint).await?;
        decode_response(&endpoint, &body, decode_lines)
    }

    /// Fetch all stop areas.
    async fn list_stops(&self) -> Result<Vec<Stop>, TlError> {
        let endpoint = Endpoint::Stops;
        let body = self.fetch(&endpoint).await?;
        decode_response(&endpoint, &body, decode_stops)
    }

    /// Fetch the routes of a line.
    async fn list_routes(&self, line: &Line) -> Result<Vec<Route>, TlError> {
        self.list_routes_for(&line.id).await
    }

    /// Fetch the routes of a line by its identifier.
    async fn list_routes_for(&self, line_id: &str) -> Result<Vec<Route>, TlError> {
        let endpoint = Endpoint::Routes {
            line_id: line_id.to_string(),
        };
        let body = self.fetch(&endpoint).await?;
        decode_response(&endpoint, &body, decode_routes)
    }

    /// Fetch the stops along a route.
    async fn route_details(&self, route_id: &str) -> Result<RouteDetails, TlError> {
        let endpoint = Endpoint::RouteDetails {
            route_id: route_id.to_string(),
        };
        let body = self.fetch(&endpoint).await?;
        decode_response(&endpoint, &body, decode_route_details)
    }

    /// Fetch the next departures of a line on a route, from `date` onwards.
    async fn departures(
        &self,
        route_id: &str,
        line_id: &str,
        date: NaiveDateTime,
        wayback: bool,
    ) -> Result<Vec<Journey>, TlError> {
        let endpoint = Endpoint::Departures {
            route_id: route_id.to_string(),
            line_id: line_id.to_string(),
            date,
            wayback,
        };
        let body = self.fetch(&endpoint).await?;
        decode_response(&endpoint, &body, decode_journeys)
    }
}

/// Decode a fetched body, logging and wrapping any failure with the endpoint.
fn decode_response<T>(
    endpoint: &Endpoint,
    body: &[u8],
    decode: impl FnOnce(&[u8]) -> Result<T, DecodeError>,
) -> Result<T, TlError> {
    decode(body).map_err(|source| {
        let endpoint = endpoint.path();
        warn!(%endpoint, error = %source, "failed to decode response");
        TlError::Decode { endpoint, source }
    })
}
