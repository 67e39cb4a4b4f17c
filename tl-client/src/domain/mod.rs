//! Domain types for the t-l transit API.
//!
//! These are the strict values produced by the wire decoder. Every boolean,
//! number, duration and timestamp has already been coerced and validated,
//! so code holding one of these types can trust its contents.

mod journey;
mod line;
mod route;
mod stop;

pub use journey::{Journey, JourneyLine, JourneyStop, Network};
pub use line::{Line, Message};
pub use route::{Route, RouteDetails, RouteStop};
pub use stop::{Coordinates, Stop, StopLine};
