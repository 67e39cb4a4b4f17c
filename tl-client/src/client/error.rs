//! Client error types.

use crate::wire::DecodeError;

use super::config::ConfigError;

/// Errors from fetching and decoding API responses.
#[derive(Debug, thiserror::Error)]
pub enum TlError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by the t-l API")]
    RateLimited,

    /// The API refused the request
    #[error("unauthorized")]
    Unauthorized,

    /// The response body did not decode
    #[error("could not decode {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: DecodeError,
    },

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No fixture file for an endpoint (mock client)
    #[error("no fixture named {name:?}")]
    MissingFixture { name: String },

    /// Fixture directory could not be read (mock client)
    #[error("fixture error: {message}")]
    Fixture { message: String },
}
