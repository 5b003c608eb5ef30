// ABOUTME: Cache key builders and time-to-live values
// ABOUTME: One place for every key prefix so invalidation and lookup agree

use std::time::Duration;

/// Library listing per profile
pub const LIBRARY_TTL: Duration = Duration::from_secs(60 * 60);
/// Live concurrent player count per app
pub const PLAYER_COUNT_TTL: Duration = Duration::from_secs(2 * 60);
/// Storefront metadata per app
pub const STORE_DETAILS_TTL: Duration = Duration::from_secs(6 * 60 * 60);
/// Friends owning an app, per profile
pub const FRIENDS_OWN_TTL: Duration = Duration::from_secs(2 * 60 * 60);

pub struct CacheKey;

impl CacheKey {
    pub fn library(profile_id: i64) -> String {
        format!("lib:{}", profile_id)
    }

    pub fn player_count(appid: i64) -> String {
        format!("players:{}", appid)
    }

    pub fn store_details(appid: i64) -> String {
        format!("store:{}", appid)
    }

    pub fn friends_who_own(profile_id: i64, appid: i64) -> String {
        format!("fown:{}:{}", profile_id, appid)
    }
}
