//! CLI module for LLMBoard server functionality.
//!
//! This module provides the `llmboard serve` command implementation.

mod config;
mod handlers;
mod state;

pub use config::{Config, ConfigError, IngestConfig, ServerConfig, SourceConfig};
pub use state::AppState;

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Run the LLMBoard server with the given configuration
pub async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    tracing::info!("Starting LLMBoard server on {}", addr);
    tracing::info!(source = ?config.source.data_source(), "Leaderboard source");
    tracing::info!("Leaderboard endpoints: /api/leaderboard, /api/leaderboard/{{view}}");

    let state = Arc::new(AppState::new(config));

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/leaderboard", get(handlers::get_leaderboard))
        .route("/api/leaderboard/{view}", get(handlers::get_view))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
