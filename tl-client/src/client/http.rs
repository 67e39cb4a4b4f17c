//! t-l API HTTP client.
//!
//! One GET per logical operation. The client only moves bytes; every
//! response body is handed to the wire decoder for the endpoint's schema.

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::debug;

use super::api::TlApi;
use super::config::TlConfig;
use super::endpoint::{Endpoint, Host};
use super::error::TlError;

/// t-l API client.
///
/// Uses a semaphore to limit concurrent requests.
#[derive(Debug, Clone)]
pub struct TlClient {
    http: reqwest::Client,
    base_host: String,
    new_api_host: String,
    semaphore: Arc<Semaphore>,
}

impl TlClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TlConfig) -> Result<Self, TlError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_host: config.base_host,
            new_api_host: config.new_api_host,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Absolute URL for an endpoint.
    pub fn url(&self, endpoint: &Endpoint) -> String {
        let host = match endpoint.host() {
            Host::Base => &self.base_host,
            Host::NewApi => &self.new_api_host,
        };
        format!("{}/{}", host.trim_end_matches('/'), endpoint.path())
    }
}

impl TlApi for TlClient {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Vec<u8>, TlError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TlError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = self.url(endpoint);
        debug!(%url, "requesting");

        let response = self.http.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(TlError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TlError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TlError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.bytes().await?;
        debug!(%url, bytes = body.len(), "received");

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = TlClient::new(TlConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn zero_concurrency_still_allows_one_request() {
        let config = TlConfig {
            max_concurrent: 0,
            ..TlConfig::default()
        };
        let client = TlClient::new(config).unwrap();

        assert_eq!(client.semaphore.available_permits(), 1);
    }

    #[test]
    fn urls_use_the_endpoint_host() {
        let config = TlConfig::default()
            .with_base_host("http://localhost:8080/")
            .with_new_api_host("http://localhost:8081");
        let client = TlClient::new(config).unwrap();

        assert_eq!(
            client.url(&Endpoint::Lines),
            "http://localhost:8080/apps/LinesList"
        );
        assert_eq!(
            client.url(&Endpoint::RouteDetails {
                route_id: "42".into()
            }),
            "http://localhost:8081/apps/RouteDetails?roid=42"
        );
    }

    // Requests against the live API are not exercised here; MockTlClient
    // covers the decode path with fixture files.
}
