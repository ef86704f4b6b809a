use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tram_router::config::ServerConfig;
use tram_router::network::load_network;
use tram_router::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let network = match load_network(&config.stops_file, &config.routes_file) {
        Ok(network) => network,
        Err(e) => {
            error!("failed to load network: {e}");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(network, config.search.clone());
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {}: {e}", config.bind_addr);
            return ExitCode::FAILURE;
        }
    };

    info!("Tram router listening on http://{}", config.bind_addr);
    info!("  GET /health                          - Health check");
    info!("  GET /stops                           - List stops");
    info!("  GET /route?from=&to=&departure=HH:MM - Find a route");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
