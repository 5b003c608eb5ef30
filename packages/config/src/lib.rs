// ABOUTME: Configuration loading for Steamfolio
// ABOUTME: Reads environment variables once and hands explicit config structs to the services

pub mod constants;

mod app;

pub use app::{
    steamfolio_dir, AppConfig, ConfigError, SteamConfig, DEFAULT_API_BASE_URL, DEFAULT_PORT,
    DEFAULT_STORE_BASE_URL,
};
