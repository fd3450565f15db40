//! Domain Availability HTTP server.
//!
//! Exposes `GET /api/v1/check/{domain}`: forwards the domain to the upstream
//! availability API and relays `{"domain": ..., "available": ...}`. Every
//! failure — network, timeout, malformed upstream body — is collapsed to the
//! one generic error payload, returned as a normal 200 JSON body exactly as
//! this service has always answered.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use clap::Parser;
use domain_availability_lib::{
    load_env_config, parse_timeout_string, AvailabilityChecker, CheckConfig, ConfigManager,
    ErrorPayload, API_KEY_ENV_VAR,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// CLI arguments for domain-availability-server
#[derive(Parser, Debug)]
#[command(name = "domain-availability-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "HTTP API for domain availability checks")]
struct Args {
    /// Address to listen on (falls back to DA_BIND, then 0.0.0.0:8080)
    #[arg(long = "bind", value_name = "ADDR")]
    bind: Option<String>,
}

/// Resolve the listen address: --bind wins over DA_BIND, then the default.
fn resolve_bind_addr(cli_bind: Option<String>, env_bind: Option<String>) -> String {
    cli_bind
        .or(env_bind)
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
}

#[derive(Clone)]
struct AppState {
    checker: Arc<AvailabilityChecker>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging();

    let config = match build_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let checker = match AvailabilityChecker::new(config) {
        Ok(checker) => checker,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let bind_addr = resolve_bind_addr(args.bind, std::env::var("DA_BIND").ok());

    let app = build_router(checker);

    info!(%bind_addr, "domain-availability-server listening");
    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Error: failed to bind {}: {}", bind_addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Error: server terminated: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Build the checker configuration from the environment and config files.
///
/// The API key comes from DOMAIN_API_KEY and is read once here, at startup.
fn build_config() -> Result<CheckConfig, String> {
    let api_key = std::env::var(API_KEY_ENV_VAR)
        .map_err(|_| format!("Missing API key: set the {} environment variable", API_KEY_ENV_VAR))?;

    let mut config = CheckConfig::new(api_key);

    let file_config = ConfigManager::new(false)
        .discover_and_load()
        .unwrap_or_default();
    if let Some(defaults) = file_config.defaults {
        if let Some(concurrency) = defaults.concurrency {
            config = config.with_concurrency(concurrency);
        }
        if let Some(timeout_str) = &defaults.timeout {
            if let Some(secs) = parse_timeout_string(timeout_str) {
                config = config.with_timeout(Duration::from_secs(secs));
            }
        }
        if let Some(endpoint) = defaults.endpoint {
            config = config.with_endpoint(endpoint);
        }
    }

    let env_config = load_env_config(false);
    if let Some(concurrency) = env_config.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(timeout_str) = &env_config.timeout {
        if let Some(secs) = parse_timeout_string(timeout_str) {
            config = config.with_timeout(Duration::from_secs(secs));
        }
    }
    if let Some(endpoint) = env_config.endpoint {
        config = config.with_endpoint(endpoint);
    }

    Ok(config)
}

fn build_router(checker: AvailabilityChecker) -> Router {
    let state = AppState {
        checker: Arc::new(checker),
    };

    Router::new()
        .route("/api/v1/check/:domain", get(check_domain))
        .with_state(state)
}

/// Handle an availability check for one domain.
///
/// The domain path segment is forwarded verbatim. Failures are logged with
/// full detail, then answered with the generic payload as a 200 JSON body —
/// the caller must not be able to distinguish failure modes, and the status
/// code never changes.
async fn check_domain(State(state): State<AppState>, Path(domain): Path<String>) -> Response {
    match state.checker.check_domain(&domain).await {
        Ok(result) => {
            info!(
                domain = %result.domain,
                available = result.available,
                status = %result.status,
                "availability check completed"
            );
            Json(result).into_response()
        }
        Err(e) => {
            warn!(%domain, error = %e, "availability check failed");
            Json(ErrorPayload::generic()).into_response()
        }
    }
}
