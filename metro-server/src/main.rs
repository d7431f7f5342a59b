use std::error::Error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use metro_server::config::ServerConfig;
use metro_server::network::StaticNetwork;
use metro_server::planner::FareConfig;
use metro_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("metro_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Fail fast if the network file is missing or malformed
    let network = StaticNetwork::load(&config.network_file)?;

    let state = AppState::new(network, FareConfig::default());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Metro route planner listening");
    info!("  GET  /health               - Health check");
    info!("  GET  /api/route/algorithms - Available algorithms");
    info!("  POST /api/route/find       - Find a route");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
