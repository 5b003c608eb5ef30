// ABOUTME: Steam integration for Steamfolio
// ABOUTME: Web API client for profiles, friends and libraries plus storefront metadata

pub mod client;
pub mod types;

pub use client::{SteamApiError, SteamApiResult, SteamClient};
pub use types::{
    Genre, OwnedGame, OwnedGames, PlayerSummary, ReleaseDate, Screenshot, StoreAppDetails,
};
