//! Mock client for working without API access.
//!
//! Loads response bodies from JSON files and serves them as if they were
//! live API responses, through the same decoders as [`super::TlClient`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::api::TlApi;
use super::endpoint::Endpoint;
use super::error::TlError;

/// Fixture file stem for an endpoint.
///
/// `lines`, `stops`, `routes-<line id>`, `route-<route id>` and
/// `departures-<route id>`; departure fixtures ignore date and direction.
pub fn fixture_name(endpoint: &Endpoint) -> String {
    match endpoint {
        Endpoint::Lines => "lines".to_string(),
        Endpoint::Stops => "stops".to_string(),
        Endpoint::Routes { line_id } => format!("routes-{line_id}"),
        Endpoint::RouteDetails { route_id } => format!("route-{route_id}"),
        Endpoint::Departures { route_id, .. } => format!("departures-{route_id}"),
    }
}

/// Mock client that serves response bodies from JSON files.
#[derive(Debug, Clone)]
pub struct MockTlClient {
    /// Raw bodies keyed by file stem.
    fixtures: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MockTlClient {
    /// Create a new mock client by loading every `.json` file in a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, TlError> {
        let fixtures = load_fixtures(data_dir.as_ref())?;

        Ok(Self {
            fixtures: Arc::new(RwLock::new(fixtures)),
        })
    }

    /// Fixture names currently loaded.
    pub async fn available(&self) -> Vec<String> {
        let fixtures = self.fixtures.read().await;
        let mut names: Vec<String> = fixtures.keys().cloned().collect();
        names.sort();
        names
    }

    /// Reload fixtures from disk.
    pub async fn reload(&self, data_dir: impl AsRef<Path>) -> Result<(), TlError> {
        let loaded = load_fixtures(data_dir.as_ref())?;
        *self.fixtures.write().await = loaded;
        Ok(())
    }
}

/// Date and direction of departure requests are ignored; mock data is static.
impl TlApi for MockTlClient {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Vec<u8>, TlError> {
        let name = fixture_name(endpoint);
        let fixtures = self.fixtures.read().await;

        fixtures
            .get(&name)
            .cloned()
            .ok_or(TlError::MissingFixture { name })
    }
}

fn load_fixtures(data_dir: &Path) -> Result<HashMap<String, Vec<u8>>, TlError> {
    let mut fixtures = HashMap::new();

    let entries = std::fs::read_dir(data_dir).map_err(|e| TlError::Fixture {
        message: format!("Failed to read mock data directory {data_dir:?}: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| TlError::Fixture {
            message: format!("Failed to read directory entry: {e}"),
        })?;

        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            return Err(TlError::Fixture {
                message: format!("Invalid filename: {path:?}"),
            });
        };

        let body = std::fs::read(&path).map_err(|e| TlError::Fixture {
            message: format!("Failed to read {path:?}: {e}"),
        })?;

        fixtures.insert(name.to_string(), body);
    }

    Ok(fixtures)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::tempdir;

    use crate::wire::{DecodeError, Decoded};

    use super::*;

    const LINES: &[u8] = include_bytes!("../../samples/line_request.json");
    const ROUTES: &[u8] = include_bytes!("../../samples/route_request.json");
    const DEPARTURES: &[u8] = include_bytes!("../../samples/next_departure.json");

    fn date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 12, 7)
            .unwrap()
            .and_hms_opt(14, 22, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn serves_fixtures_through_decoders() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("lines.json"), LINES).unwrap();
        fs::write(dir.path().join("routes-11821953316814862.json"), ROUTES).unwrap();
        fs::write(dir.path().join("departures-1970329131942119.json"), DEPARTURES).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let client = MockTlClient::new(dir.path()).unwrap();

        assert_eq!(
            client.available().await,
            [
                "departures-1970329131942119",
                "lines",
                "routes-11821953316814862"
            ]
        );

        let lines = client.list_lines().await.unwrap();
        assert_eq!(lines.len(), 2);

        let routes = client.list_routes_for(&lines[1].id).await.unwrap();
        assert_eq!(routes.len(), 2);

        let journeys = client
            .departures(&routes[0].id, &lines[1].id, date(), routes[0].wayback)
            .await
            .unwrap();
        assert_eq!(journeys.len(), 3);
    }

    #[tokio::test]
    async fn get_decodes_by_endpoint_schema() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("lines.json"), LINES).unwrap();

        let client = MockTlClient::new(dir.path()).unwrap();
        let decoded = client.get(&Endpoint::Lines).await.unwrap();

        assert!(matches!(decoded, Decoded::Lines(ref lines) if lines.len() == 2));
    }

    #[tokio::test]
    async fn missing_fixture_returns_error() {
        let dir = tempdir().unwrap();
        let client = MockTlClient::new(dir.path()).unwrap();

        let result = client.list_stops().await;

        assert!(matches!(
            result,
            Err(TlError::MissingFixture { ref name }) if name == "stops"
        ));
    }

    #[tokio::test]
    async fn broken_fixture_surfaces_decode_error() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("route-42.json"),
            r#"{"routeDetails":{"route":{"wayback":"maybe"}}}"#,
        )
        .unwrap();

        let client = MockTlClient::new(dir.path()).unwrap();
        let err = client.route_details("42").await.unwrap_err();

        match err {
            TlError::Decode { endpoint, source } => {
                assert_eq!(endpoint, "apps/RouteDetails?roid=42");
                assert_eq!(source.path(), Some("routeDetails.route.wayback"));
                assert!(matches!(source, DecodeError::FieldCoercion { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn reload_picks_up_new_files() {
        let dir = tempdir().unwrap();
        let client = MockTlClient::new(dir.path()).unwrap();
        assert!(client.available().await.is_empty());

        fs::write(dir.path().join("lines.json"), LINES).unwrap();
        client.reload(dir.path()).await.unwrap();

        assert_eq!(client.available().await, ["lines"]);
    }

    #[test]
    fn missing_directory_is_fixture_error() {
        let result = MockTlClient::new("/nonexistent/tl-fixtures");
        assert!(matches!(result, Err(TlError::Fixture { .. })));
    }

    #[test]
    fn fixture_names() {
        assert_eq!(fixture_name(&Endpoint::Lines), "lines");
        assert_eq!(
            fixture_name(&Endpoint::Departures {
                route_id: "7".into(),
                line_id: "8".into(),
                date: date(),
                wayback: false,
            }),
            "departures-7"
        );
    }
}
