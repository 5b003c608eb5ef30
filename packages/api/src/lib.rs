// ABOUTME: HTTP API layer for Steamfolio providing JSON endpoints and routing
// ABOUTME: Thin integration layer over the portfolio services

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use steamfolio_portfolio::PortfolioService;

pub mod error;
pub mod health;
pub mod profiles_handlers;
pub mod response;

pub use error::ApiError;
pub use response::ApiResponse;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub portfolio: Arc<PortfolioService>,
}

impl AppState {
    pub fn new(portfolio: PortfolioService) -> Self {
        Self {
            portfolio: Arc::new(portfolio),
        }
    }
}

/// Creates the profile and library routes
pub fn create_profiles_router() -> Router<AppState> {
    Router::new()
        .route("/api/profiles", post(profiles_handlers::link_profile))
        .route(
            "/api/profiles/{profile_id}",
            get(profiles_handlers::get_profile),
        )
        .route(
            "/api/profiles/{profile_id}/library",
            get(profiles_handlers::get_library),
        )
        .route(
            "/api/profiles/{profile_id}/games/{appid}",
            get(profiles_handlers::get_game_detail),
        )
        .route(
            "/api/profiles/{profile_id}/sync",
            post(profiles_handlers::force_sync),
        )
}

/// Full application router with request tracing
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .merge(create_profiles_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
