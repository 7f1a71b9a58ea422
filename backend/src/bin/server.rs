//! Constellation HTTP Server Binary
//!
//! Main entry point for the constellation REST API server. It loads the
//! configuration, builds the repository, cache and inference engine, sets up
//! the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: empty in-memory repository on 0.0.0.0:8080
//! cargo run --bin constellation-server
//!
//! # Explicit configuration file
//! CONSTELLATION_CONFIG=backend/constellation.toml cargo run --bin constellation-server
//! ```
//!
//! # Environment Variables
//!
//! - `CONSTELLATION_CONFIG`: Path to a TOML configuration file
//! - `REPOSITORY_TYPE`: Repository backend (overrides `[repository] type`)
//! - `HOST`: Server host (overrides `[server] host`)
//! - `PORT`: Server port (overrides `[server] port`)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use patent_constellation::config::ServiceConfig;
use patent_constellation::db::RepositoryFactory;
use patent_constellation::http::{create_router, AppState};
use patent_constellation::services::ConstellationService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting constellation HTTP server");

    let config = ServiceConfig::load()?;
    let repository = RepositoryFactory::from_settings(&config.repository)?;
    info!(
        "Repository initialized ({}), cache {}",
        config.repository.repo_type,
        if config.cache.enabled { "enabled" } else { "disabled" }
    );

    let service = ConstellationService::from_config(&config, repository);
    let app = create_router(AppState::new(Arc::new(service)));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
