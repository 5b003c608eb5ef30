// ABOUTME: Domain records shared across Steamfolio packages
// ABOUTME: Profiles, games, per-user playtime and achievement state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name stored for games whose owned-games entry carried no name
pub const UNKNOWN_GAME_NAME: &str = "Unknown";

/// Local record linking a site user to a Steam identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub user_id: String,
    pub steamid64: String,
    pub persona: String,
    pub avatar: String,
    pub level: i64,
    pub last_synced: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn has_synced(&self) -> bool {
        self.last_synced.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub appid: i64,
    pub name: String,
}

/// Latest playtime snapshot for one game in one profile's library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGame {
    pub id: i64,
    pub profile_id: i64,
    pub appid: i64,
    pub playtime_forever: i64,
    pub playtime_2weeks: i64,
    pub rtime_last_played: i64,
}

/// Playtime fields written by a sync, keyed by appid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaytimeSnapshot {
    pub playtime_forever: i64,
    pub playtime_2weeks: i64,
    pub rtime_last_played: i64,
}

/// Library row joined with its game name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub appid: i64,
    pub name: String,
    pub playtime_forever: i64,
    pub playtime_2weeks: i64,
    pub rtime_last_played: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: i64,
    pub appid: i64,
    pub apiname: String,
    pub displayname: String,
    pub description: String,
    pub icon: String,
    pub icongray: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievement {
    pub id: i64,
    pub profile_id: i64,
    pub appid: i64,
    pub apiname: String,
    pub achieved: bool,
    pub unlocktime: i64,
}
