//! Client library for the t-l (Lausanne public transport) schedule API.
//!
//! The API's JSON sends booleans and numbers as strings, durations as
//! fixed-width `HH:MM:SS` and timestamps in a custom layout. The [`wire`]
//! module turns that into the strict [`domain`] types; [`client`] fetches
//! the bytes.

pub mod client;
pub mod domain;
pub mod wire;
