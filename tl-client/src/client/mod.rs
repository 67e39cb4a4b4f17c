//! Transport collaborator for the t-l API.
//!
//! Fetches response bodies over HTTP (or from fixture files) and hands them
//! to the [`crate::wire`] decoders. Hosts come from an explicit [`TlConfig`]
//! passed at construction time.

mod api;
mod config;
mod endpoint;
mod error;
mod http;
mod mock;

pub use api::TlApi;
pub use config::{ConfigError, DEFAULT_BASE_HOST, DEFAULT_NEW_API_HOST, TlConfig};
pub use endpoint::{Endpoint, Host};
pub use error::TlError;
pub use http::TlClient;
pub use mock::{MockTlClient, fixture_name};
