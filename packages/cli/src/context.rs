// ABOUTME: Builds the service graph from loaded configuration
// ABOUTME: Opens the database, constructs the Steam client and selects the cache backend

use anyhow::Context;
use tracing::info;

use steamfolio_cache::Cache;
use steamfolio_config::AppConfig;
use steamfolio_portfolio::PortfolioService;
use steamfolio_steam::SteamClient;
use steamfolio_storage::connect;

pub struct AppContext {
    pub config: AppConfig,
    pub portfolio: PortfolioService,
}

impl AppContext {
    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let pool = connect(&config.database_path).await.with_context(|| {
            format!(
                "Failed to open database at {}",
                config.database_path.display()
            )
        })?;
        info!("Database ready at {}", config.database_path.display());

        let steam =
            SteamClient::new(config.steam.clone()).context("Failed to build Steam API client")?;
        let cache = Cache::from_flag(config.cache_enabled);
        if !cache.is_enabled() {
            info!("Caching disabled");
        }

        Ok(Self {
            portfolio: PortfolioService::new(pool, steam, cache),
            config,
        })
    }
}
