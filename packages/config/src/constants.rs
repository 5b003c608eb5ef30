// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Steamfolio

// Steam Web API
pub const STEAM_WEB_API_KEY: &str = "STEAM_WEB_API_KEY";
pub const STEAM_API_BASE_URL: &str = "STEAM_API_BASE_URL";
pub const STEAM_STORE_BASE_URL: &str = "STEAM_STORE_BASE_URL";

// Server Configuration
pub const STEAMFOLIO_PORT: &str = "STEAMFOLIO_PORT";
pub const PORT: &str = "PORT"; // Legacy

// Storage
pub const STEAMFOLIO_DATABASE_PATH: &str = "STEAMFOLIO_DATABASE_PATH";

// Cache
pub const STEAMFOLIO_CACHE_ENABLED: &str = "STEAMFOLIO_CACHE_ENABLED";

// System Environment Variables
pub const HOME: &str = "HOME";
