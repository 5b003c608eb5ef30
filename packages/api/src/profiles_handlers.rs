// ABOUTME: HTTP request handlers for profiles and their Steam libraries
// ABOUTME: Link, fetch, library listing, game detail and forced resync

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::response::ok;
use crate::AppState;

/// Request body for linking a user to a Steam account
#[derive(Debug, Deserialize)]
pub struct LinkProfileRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub steamid64: String,
}

pub async fn link_profile(
    State(state): State<AppState>,
    Json(request): Json<LinkProfileRequest>,
) -> Result<Response, ApiError> {
    info!("Linking user {} to steam {}", request.user_id, request.steamid64);

    let profile = state
        .portfolio
        .link_profile(&request.user_id, &request.steamid64)
        .await?;
    Ok(ok(profile))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<i64>,
) -> Result<Response, ApiError> {
    let profile = state.portfolio.get_profile(profile_id).await?;
    Ok(ok(profile))
}

/// Library listing, most played first; syncs on first view
pub async fn get_library(
    State(state): State<AppState>,
    Path(profile_id): Path<i64>,
) -> Result<Response, ApiError> {
    info!("Getting library for profile: {}", profile_id);

    let library = state.portfolio.library(profile_id).await?;
    Ok(ok(library))
}

pub async fn get_game_detail(
    State(state): State<AppState>,
    Path((profile_id, appid)): Path<(i64, i64)>,
) -> Result<Response, ApiError> {
    info!("Getting app {} for profile {}", appid, profile_id);

    let detail = state.portfolio.game_detail(profile_id, appid).await?;
    Ok(ok(detail))
}

pub async fn force_sync(
    State(state): State<AppState>,
    Path(profile_id): Path<i64>,
) -> Result<Response, ApiError> {
    info!("Forcing sync for profile: {}", profile_id);

    let summary = state.portfolio.force_sync(profile_id).await?;
    Ok(ok(summary))
}
