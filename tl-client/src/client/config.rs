//! Client configuration.

use std::str::FromStr;

/// Default host for the `apps/*` endpoints.
pub const DEFAULT_BASE_HOST: &str = "http://syn.t-l.ch";

/// Default host for endpoints only served by the newer API.
pub const DEFAULT_NEW_API_HOST: &str = "http://tl-apps.t-l.ch";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error from reading configuration out of the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Configuration for [`super::TlClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlConfig {
    /// Host serving `apps/*` list and departure endpoints.
    pub base_host: String,
    /// Host serving the newer endpoints (route details).
    pub new_api_host: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
}

impl Default for TlConfig {
    fn default() -> Self {
        Self {
            base_host: DEFAULT_BASE_HOST.to_string(),
            new_api_host: DEFAULT_NEW_API_HOST.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

impl TlConfig {
    /// Build a config from `TL_BASE_HOST`, `TL_NEW_API_HOST`,
    /// `TL_TIMEOUT_SECS` and `TL_MAX_CONCURRENT`, using defaults for
    /// anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = lookup("TL_BASE_HOST") {
            config.base_host = host;
        }
        if let Some(host) = lookup("TL_NEW_API_HOST") {
            config.new_api_host = host;
        }
        if let Some(secs) = parse_var(&lookup, "TL_TIMEOUT_SECS")? {
            config.timeout_secs = secs;
        }
        if let Some(n) = parse_var::<usize>(&lookup, "TL_MAX_CONCURRENT")? {
            if n == 0 {
                return Err(ConfigError {
                    var: "TL_MAX_CONCURRENT",
                    value: n.to_string(),
                });
            }
            config.max_concurrent = n;
        }

        Ok(config)
    }

    /// Set the base host (for testing against a local server).
    pub fn with_base_host(mut self, host: impl Into<String>) -> Self {
        self.base_host = host.into();
        self
    }

    /// Set the new-API host.
    pub fn with_new_api_host(mut self, host: impl Into<String>) -> Self {
        self.new_api_host = host.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set maximum concurrent requests. At least one request is always allowed.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n.max(1);
        self
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError { var, value }),
    }
}
