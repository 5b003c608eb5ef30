// ABOUTME: HTTP server startup for the `serve` command
// ABOUTME: Mounts the API router with CORS and shuts down on Ctrl+C

use std::net::SocketAddr;

use anyhow::Context;
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use steamfolio_api::{create_router, AppState};

use crate::AppContext;

pub async fn serve(context: AppContext, port: u16) -> anyhow::Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let app = create_router(AppState::new(context.portfolio)).layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Steamfolio listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
