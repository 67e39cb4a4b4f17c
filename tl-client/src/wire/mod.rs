//! Wire decoder for the t-l (Transports publics de la région lausannoise) API.
//!
//! The API's JSON is loosely typed: booleans and numbers arrive as strings,
//! durations as `HH:MM:SS` and timestamps as `YYYY-MM-DD HH:MM:SS`. Decoding
//! happens in two named stages:
//!
//! 1. [`types`]: parse into DTOs where every leaf is text.
//! 2. [`convert`]: coerce each field into the strict [`crate::domain`] types.
//!
//! [`envelope`] ties both together for whole response bodies. Decoding is
//! pure and synchronous; each call owns its result and shares nothing.

mod coerce;
pub mod convert;
mod envelope;
mod error;
pub mod types;

pub use coerce::{
    WIRE_FALSE, WIRE_TRUE, bool_to_wire, coerce_bool, coerce_duration, coerce_float, coerce_int,
    coerce_timestamp,
};
pub use envelope::{
    Decoded, Schema, decode, decode_journeys, decode_lines, decode_route_details, decode_routes,
    decode_stops, parse_body,
};
pub use error::{CoercionError, DecodeError};
