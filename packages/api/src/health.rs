// ABOUTME: Health check endpoint
// ABOUTME: Reports service liveness and whether the cache is active

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "steamfolio",
        "cacheEnabled": state.portfolio.cache().is_enabled()
    }))
}
