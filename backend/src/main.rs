//! Backend entry-point: wires the portal REST API and health probes.

use actix_web::{HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::server::config::ServerConfig;
use backend::server::{build_app, build_state};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;
    let state = build_state(&config).map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let server_state = state.clone();
    let server = HttpServer::new(move || {
        build_app(server_state.clone(), server_health_state.clone())
    })
    .bind(config.bind_addr)?;

    info!(addr = %config.bind_addr, "portal backend listening");
    health_state.mark_ready();
    server.run().await
}
