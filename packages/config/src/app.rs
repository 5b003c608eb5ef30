// ABOUTME: Application configuration loaded from environment variables
// ABOUTME: Server, database, cache and Steam API settings with validation

use std::env;
use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::constants;

pub const DEFAULT_PORT: u16 = 4010;
pub const DEFAULT_API_BASE_URL: &str = "https://api.steampowered.com";
pub const DEFAULT_STORE_BASE_URL: &str = "https://store.steampowered.com";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 25;
const DEFAULT_PLAYER_COUNT_TIMEOUT_SECS: u64 = 20;
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 25;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingApiKey(&'static str),
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid boolean for {name}: {value}")]
    InvalidBool { name: &'static str, value: String },
    #[error("Unable to determine home directory")]
    NoHomeDir,
}

/// Credentials and endpoints for the Steam Web API and storefront
#[derive(Clone)]
pub struct SteamConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub store_base_url: String,
    pub request_timeout: Duration,
    pub player_count_timeout: Duration,
    pub store_timeout: Duration,
}

impl SteamConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            store_base_url: DEFAULT_STORE_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            player_count_timeout: Duration::from_secs(DEFAULT_PLAYER_COUNT_TIMEOUT_SECS),
            store_timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
        }
    }

    /// Point both the keyed API and the storefront at one base URL (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.api_base_url = base_url.clone();
        self.store_base_url = base_url;
        self
    }
}

// Keep the key out of logs
impl fmt::Debug for SteamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SteamConfig")
            .field("api_key", &"***")
            .field("api_base_url", &self.api_base_url)
            .field("store_base_url", &self.store_base_url)
            .field("request_timeout", &self.request_timeout)
            .field("player_count_timeout", &self.player_count_timeout)
            .field("store_timeout", &self.store_timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_path: PathBuf,
    pub cache_enabled: bool,
    pub steam: SteamConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any key lookup, so callers and tests need not touch the process env
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(constants::STEAM_WEB_API_KEY)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey(constants::STEAM_WEB_API_KEY))?;

        let port_str = lookup(constants::STEAMFOLIO_PORT)
            .or_else(|| lookup(constants::PORT))
            .unwrap_or_else(|| DEFAULT_PORT.to_string());
        let port = port_str.trim().parse::<u16>()?;
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let database_path = match lookup(constants::STEAMFOLIO_DATABASE_PATH) {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path.trim()),
            _ => steamfolio_dir(&lookup)?.join("steamfolio.db"),
        };

        let cache_enabled = match lookup(constants::STEAMFOLIO_CACHE_ENABLED) {
            Some(value) => parse_bool(constants::STEAMFOLIO_CACHE_ENABLED, &value)?,
            None => true,
        };

        let mut steam = SteamConfig::new(api_key);
        if let Some(url) = lookup(constants::STEAM_API_BASE_URL) {
            steam.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = lookup(constants::STEAM_STORE_BASE_URL) {
            steam.store_base_url = url.trim_end_matches('/').to_string();
        }

        let config = AppConfig {
            port,
            database_path,
            cache_enabled,
            steam,
        };
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}

/// Get the path to the Steamfolio directory (~/.steamfolio)
pub fn steamfolio_dir<F>(lookup: &F) -> Result<PathBuf, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // HOME first so tests can redirect it
    if let Some(home) = lookup(constants::HOME) {
        return Ok(PathBuf::from(home).join(".steamfolio"));
    }
    dirs::home_dir()
        .map(|home| home.join(".steamfolio"))
        .ok_or(ConfigError::NoHomeDir)
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("STEAM_WEB_API_KEY", "abc"), ("HOME", "/home/u")]))
                .unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(
            config.database_path,
            PathBuf::from("/home/u/.steamfolio/steamfolio.db")
        );
        assert!(config.cache_enabled);
        assert_eq!(config.steam.api_key, "abc");
        assert_eq!(config.steam.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.steam.store_base_url, DEFAULT_STORE_BASE_URL);
        assert_eq!(config.steam.request_timeout, Duration::from_secs(25));
        assert_eq!(config.steam.player_count_timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_missing_api_key() {
        let result = AppConfig::from_lookup(lookup_from(&[("HOME", "/home/u")]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey(_))));

        let result =
            AppConfig::from_lookup(lookup_from(&[("STEAM_WEB_API_KEY", "  "), ("HOME", "/h")]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey(_))));
    }

    #[test]
    fn test_port_precedence_and_validation() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("STEAM_WEB_API_KEY", "k"),
            ("HOME", "/h"),
            ("STEAMFOLIO_PORT", "8080"),
            ("PORT", "9090"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);

        let config = AppConfig::from_lookup(lookup_from(&[
            ("STEAM_WEB_API_KEY", "k"),
            ("HOME", "/h"),
            ("PORT", "9090"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9090);

        let result = AppConfig::from_lookup(lookup_from(&[
            ("STEAM_WEB_API_KEY", "k"),
            ("HOME", "/h"),
            ("PORT", "not-a-number"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidPort(_))));

        let result = AppConfig::from_lookup(lookup_from(&[
            ("STEAM_WEB_API_KEY", "k"),
            ("HOME", "/h"),
            ("PORT", "0"),
        ]));
        assert!(matches!(result, Err(ConfigError::PortOutOfRange(0))));
    }

    #[test]
    fn test_optional_toggles() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("STEAM_WEB_API_KEY", "k"),
            ("HOME", "/h"),
            ("STEAMFOLIO_CACHE_ENABLED", "false"),
            ("STEAMFOLIO_DATABASE_PATH", "/tmp/sf.db"),
            ("STEAM_API_BASE_URL", "http://localhost:9000/"),
        ]))
        .unwrap();

        assert!(!config.cache_enabled);
        assert_eq!(config.database_path, PathBuf::from("/tmp/sf.db"));
        assert_eq!(config.steam.api_base_url, "http://localhost:9000");

        let result = AppConfig::from_lookup(lookup_from(&[
            ("STEAM_WEB_API_KEY", "k"),
            ("HOME", "/h"),
            ("STEAMFOLIO_CACHE_ENABLED", "maybe"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidBool { .. })));
    }

    #[test]
    fn test_debug_masks_api_key() {
        let rendered = format!("{:?}", SteamConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        env::set_var("STEAM_WEB_API_KEY", "env-key");
        env::set_var("STEAMFOLIO_PORT", "5050");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.steam.api_key, "env-key");
        assert_eq!(config.port, 5050);

        env::remove_var("STEAM_WEB_API_KEY");
        env::remove_var("STEAMFOLIO_PORT");
    }
}
