// ABOUTME: Library sync routine reconciling Steam data with local storage
// ABOUTME: Best-effort profile refresh, required owned-games pull, then per-game upserts

use std::collections::HashSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::SyncError;
use steamfolio_core::{PlaytimeSnapshot, Profile, UNKNOWN_GAME_NAME};
use steamfolio_steam::{OwnedGame, SteamClient};
use steamfolio_storage::{GameStorage, LibraryStorage, ProfileStorage};

/// Counts reported by a completed sync; `games_synced` counts distinct appids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub games_synced: usize,
    pub entries_skipped: usize,
}

/// Freshly fetched profile fields; `None` keeps the stored value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileRefresh {
    pub persona: Option<String>,
    pub avatar: Option<String>,
    pub level: Option<i64>,
}

impl ProfileRefresh {
    pub fn apply(self, profile: &mut Profile) {
        if let Some(persona) = self.persona {
            profile.persona = persona;
        }
        if let Some(avatar) = self.avatar {
            profile.avatar = avatar;
        }
        if let Some(level) = self.level {
            profile.level = level;
        }
    }
}

pub struct SyncService {
    profiles: ProfileStorage,
    games: GameStorage,
    library: LibraryStorage,
    steam: SteamClient,
}

impl SyncService {
    pub fn new(pool: SqlitePool, steam: SteamClient) -> Self {
        Self {
            profiles: ProfileStorage::new(pool.clone()),
            games: GameStorage::new(pool.clone()),
            library: LibraryStorage::new(pool),
            steam,
        }
    }

    /// Pull the profile and owned games from Steam and upsert them locally.
    ///
    /// Not atomic: a failure mid-loop leaves earlier rows written. `last_synced`
    /// only advances once every entry has been stored.
    pub async fn sync_library(&self, profile_id: i64) -> Result<SyncSummary, SyncError> {
        let mut profile = self.profiles.get_profile(profile_id).await.map_err(|e| {
            if e.is_not_found() {
                SyncError::ProfileNotFound(profile_id)
            } else {
                e.into()
            }
        })?;

        info!(
            "Syncing library for profile {} (steam {})",
            profile.id, profile.steamid64
        );

        let refresh = self.fetch_profile_refresh(&profile.steamid64).await;
        let owned = self.steam.get_owned_games(&profile.steamid64).await?;

        let mut summary = SyncSummary::default();
        let mut synced = HashSet::new();
        for entry in owned.games() {
            match self.store_entry(profile.id, entry).await? {
                Some(appid) => {
                    synced.insert(appid);
                }
                None => summary.entries_skipped += 1,
            }
        }
        summary.games_synced = synced.len();

        refresh.apply(&mut profile);
        profile.last_synced = Some(Utc::now());
        self.profiles.save_profile(&profile).await?;

        info!(
            "Synced {} games for profile {} ({} skipped)",
            summary.games_synced, profile.id, summary.entries_skipped
        );
        Ok(summary)
    }

    /// Stored appid, or `None` when the entry has no usable appid
    async fn store_entry(
        &self,
        profile_id: i64,
        entry: &OwnedGame,
    ) -> Result<Option<i64>, SyncError> {
        let Some(appid) = entry.appid.filter(|appid| *appid > 0) else {
            debug!("Skipping owned-games entry without appid: {:?}", entry.name);
            return Ok(None);
        };

        let name = entry
            .name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(UNKNOWN_GAME_NAME);

        self.games.upsert_game(appid, name).await?;
        self.library
            .upsert_user_game(
                profile_id,
                appid,
                PlaytimeSnapshot {
                    playtime_forever: entry.playtime_forever,
                    playtime_2weeks: entry.playtime_2weeks,
                    rtime_last_played: entry.rtime_last_played,
                },
            )
            .await?;

        Ok(Some(appid))
    }

    /// Persona, avatar and level; each field is `None` when its call fails or returns nothing
    async fn fetch_profile_refresh(&self, steamid: &str) -> ProfileRefresh {
        let mut refresh = ProfileRefresh::default();

        match self.steam.get_player_summaries(&[steamid]).await {
            Ok(players) => {
                if let Some(player) = players.into_iter().find(|p| p.steamid == steamid) {
                    refresh.persona = player.personaname.filter(|s| !s.is_empty());
                    refresh.avatar = player.avatarfull.filter(|s| !s.is_empty());
                }
            }
            Err(e) => warn!("Player summary refresh failed for {}: {}", steamid, e),
        }

        match self.steam.get_steam_level(steamid).await {
            Ok(level) if level > 0 => refresh.level = Some(level),
            Ok(_) => {}
            Err(e) => warn!("Steam level refresh failed for {}: {}", steamid, e),
        }

        refresh
    }
}
