use std::collections::HashMap;

use tempfile::TempDir;

use crate::AppContext;
use steamfolio_config::{constants, AppConfig};

fn config_for(dir: &TempDir, cache_enabled: &str) -> AppConfig {
    let mut vars = HashMap::new();
    vars.insert(constants::STEAM_WEB_API_KEY, "test-key".to_string());
    vars.insert(
        constants::STEAMFOLIO_DATABASE_PATH,
        dir.path()
            .join("nested")
            .join("steamfolio.db")
            .to_string_lossy()
            .into_owned(),
    );
    vars.insert(constants::STEAMFOLIO_CACHE_ENABLED, cache_enabled.to_string());

    AppConfig::from_lookup(|name| vars.get(name).cloned()).unwrap()
}

#[tokio::test]
async fn test_context_creates_database_and_links_profiles() {
    let dir = TempDir::new().unwrap();
    let context = AppContext::from_config(config_for(&dir, "true"))
        .await
        .unwrap();

    assert!(dir.path().join("nested").join("steamfolio.db").exists());
    assert!(context.portfolio.cache().is_enabled());

    let profile = context
        .portfolio
        .link_profile("alice", "76561197960287930")
        .await
        .unwrap();
    assert_eq!(
        context.portfolio.get_profile(profile.id).await.unwrap(),
        profile
    );
}

#[tokio::test]
async fn test_context_respects_cache_flag() {
    let dir = TempDir::new().unwrap();
    let context = AppContext::from_config(config_for(&dir, "false"))
        .await
        .unwrap();

    assert!(!context.portfolio.cache().is_enabled());
}
