use std::process::ExitCode;

use tl_client::client::{Endpoint, MockTlClient, TlApi, TlClient, TlConfig, TlError};
use tl_client::wire::Decoded;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: tl-client <command>

commands:
  lines                                  list all lines
  stops                                  list all stop areas
  routes <line-id>                       list the routes of a line
  route <route-id>                       show the stops along a route
  departures <route-id> <line-id> [0|1]  next departures (1 = wayback)

environment:
  TL_BASE_HOST, TL_NEW_API_HOST, TL_TIMEOUT_SECS, TL_MAX_CONCURRENT
  TL_FIXTURES  serve responses from this directory instead of the API
  RUST_LOG     log filter (default: info)";

/// Where responses come from.
enum Source {
    Live(TlClient),
    Fixtures(MockTlClient),
}

impl Source {
    fn from_env() -> Result<Self, TlError> {
        if let Ok(dir) = std::env::var("TL_FIXTURES") {
            info!(%dir, "serving responses from fixtures");
            return Ok(Source::Fixtures(MockTlClient::new(dir)?));
        }

        let config = TlConfig::from_env()?;
        info!(base_host = %config.base_host, "using live API");
        Ok(Source::Live(TlClient::new(config)?))
    }

    async fn get(&self, endpoint: &Endpoint) -> Result<Decoded, TlError> {
        match self {
            Source::Live(client) => client.get(endpoint).await,
            Source::Fixtures(client) => client.get(endpoint).await,
        }
    }
}

/// Parse command-line arguments into an endpoint.
fn parse_args(args: &[String]) -> Option<Endpoint> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["lines"] => Some(Endpoint::Lines),
        ["stops"] => Some(Endpoint::Stops),
        ["routes", line_id] => Some(Endpoint::Routes {
            line_id: line_id.to_string(),
        }),
        ["route", route_id] => Some(Endpoint::RouteDetails {
            route_id: route_id.to_string(),
        }),
        ["departures", route_id, line_id, rest @ ..] => {
            let wayback = match rest {
                [] => false,
                [flag] => tl_client::wire::coerce_bool(flag).ok()?,
                _ => return None,
            };
            Some(Endpoint::Departures {
                route_id: route_id.to_string(),
                line_id: line_id.to_string(),
                date: chrono::Local::now().naive_local(),
                wayback,
            })
        }
        _ => None,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(endpoint) = parse_args(&args) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let source = match Source::from_env() {
        Ok(source) => source,
        Err(e) => {
            error!("failed to set up client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let decoded = match source.get(&endpoint).await {
        Ok(decoded) => decoded,
        Err(e) => {
            error!("request failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(count = decoded.len(), "decoded");

    match serde_json::to_string_pretty(&decoded) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("failed to render output: {e}");
            ExitCode::FAILURE
        }
    }
}
