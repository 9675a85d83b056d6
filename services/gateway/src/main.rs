mod config;
mod error;
mod extract;
mod handlers;
mod models;
mod presence;
mod router;
mod state;

use config::Config;
use router::create_router;
use state::AppState;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Starting meal matching gateway");

    let config = Config::from_env();

    // Application state: in-memory store with the seed catalog, the match
    // engine over it, and the presence channel for push delivery.
    let state = AppState::new();

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
