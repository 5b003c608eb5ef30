// ABOUTME: Portfolio service composing storage, the Steam client and the cache
// ABOUTME: Profile linking, cached library listing, game detail and forced resync

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{PortfolioError, Result};
use crate::sync::{SyncService, SyncSummary};
use steamfolio_cache::{
    Cache, CacheKey, FRIENDS_OWN_TTL, LIBRARY_TTL, PLAYER_COUNT_TTL, STORE_DETAILS_TTL,
};
use steamfolio_core::{header_image_url, LibraryEntry, Profile};
use steamfolio_steam::{SteamApiResult, SteamClient, StoreAppDetails};
use steamfolio_storage::{LibraryStorage, ProfileStorage};

/// Friends checked per friends-who-own lookup, one owned-games call each
pub const MAX_FRIENDS_CHECKED: usize = 50;

/// A friend who owns the app being viewed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendOwner {
    pub steamid: String,
    pub persona: Option<String>,
    pub avatar: Option<String>,
}

impl FriendOwner {
    fn from_id(steamid: String) -> Self {
        Self {
            steamid,
            persona: None,
            avatar: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetail {
    pub entry: LibraryEntry,
    pub header_image: String,
    pub player_count: u64,
    pub store: StoreAppDetails,
    pub friends_who_own: Vec<FriendOwner>,
}

pub struct PortfolioService {
    profiles: ProfileStorage,
    library: LibraryStorage,
    steam: SteamClient,
    cache: Cache,
    sync: SyncService,
}

impl PortfolioService {
    pub fn new(pool: SqlitePool, steam: SteamClient, cache: Cache) -> Self {
        Self {
            profiles: ProfileStorage::new(pool.clone()),
            library: LibraryStorage::new(pool.clone()),
            sync: SyncService::new(pool, steam.clone()),
            steam,
            cache,
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// First-login hook: the user's profile, created with `steamid64` if absent.
    /// An existing profile keeps its Steam ID.
    pub async fn link_profile(&self, user_id: &str, steamid64: &str) -> Result<Profile> {
        let user_id = user_id.trim();
        let steamid64 = steamid64.trim();

        if user_id.is_empty() {
            return Err(PortfolioError::InvalidInput("user id is required".to_string()));
        }
        if steamid64.is_empty() || !steamid64.chars().all(|c| c.is_ascii_digit()) {
            return Err(PortfolioError::InvalidInput(format!(
                "invalid steamid64: {:?}",
                steamid64
            )));
        }

        let (profile, created) = self
            .profiles
            .get_or_create_for_user(user_id, steamid64)
            .await?;
        if !created && profile.steamid64 != steamid64 {
            debug!(
                "User {} already linked to {}, ignoring {}",
                user_id, profile.steamid64, steamid64
            );
        }

        Ok(profile)
    }

    pub async fn get_profile(&self, profile_id: i64) -> Result<Profile> {
        self.profiles.get_profile(profile_id).await.map_err(|e| {
            if e.is_not_found() {
                PortfolioError::ProfileNotFound(profile_id)
            } else {
                e.into()
            }
        })
    }

    /// The profile's library, most played first. A profile that has never
    /// synced is synced before the first listing.
    pub async fn library(&self, profile_id: i64) -> Result<Vec<LibraryEntry>> {
        let profile = self.get_profile(profile_id).await?;

        if !profile.has_synced() {
            info!("Profile {} has never synced, syncing now", profile_id);
            self.sync.sync_library(profile_id).await?;
        }

        let entries = self
            .cache
            .get_or_fetch(&CacheKey::library(profile_id), LIBRARY_TTL, || {
                self.library.list_library(profile_id)
            })
            .await?;

        Ok(entries)
    }

    /// One owned game with live player count, store metadata and friends who own it
    pub async fn game_detail(&self, profile_id: i64, appid: i64) -> Result<GameDetail> {
        let profile = self.get_profile(profile_id).await?;

        let entry = self
            .library
            .find_library_entry(profile_id, appid)
            .await?
            .ok_or(PortfolioError::GameNotInLibrary { profile_id, appid })?;

        let player_count = self
            .cache
            .get_or_compute(&CacheKey::player_count(appid), PLAYER_COUNT_TTL, || {
                self.steam.get_number_of_current_players(appid)
            })
            .await;

        let store = self
            .cache
            .get_or_compute_unless(
                &CacheKey::store_details(appid),
                STORE_DETAILS_TTL,
                || self.steam.get_store_app_details(appid),
                StoreAppDetails::is_empty,
            )
            .await;

        let friends_who_own = self
            .cache
            .get_or_fetch(
                &CacheKey::friends_who_own(profile.id, appid),
                FRIENDS_OWN_TTL,
                || self.find_friend_owners(&profile, appid),
            )
            .await
            .unwrap_or_else(|e| {
                warn!("Friend list unavailable for {}: {}", profile.steamid64, e);
                Vec::new()
            });

        Ok(GameDetail {
            entry,
            header_image: header_image_url(appid),
            player_count,
            store,
            friends_who_own,
        })
    }

    /// Friends of `profile` who own `appid`. Never fails: an unreadable friend
    /// list yields no owners and unreadable friend libraries are skipped.
    pub async fn friends_who_own(&self, profile: &Profile, appid: i64) -> Vec<FriendOwner> {
        match self.find_friend_owners(profile, appid).await {
            Ok(owners) => owners,
            Err(e) => {
                warn!("Friend list unavailable for {}: {}", profile.steamid64, e);
                Vec::new()
            }
        }
    }

    /// Fails only when the friend list itself cannot be read
    async fn find_friend_owners(
        &self,
        profile: &Profile,
        appid: i64,
    ) -> SteamApiResult<Vec<FriendOwner>> {
        let friend_ids = self.steam.get_friend_steamids(&profile.steamid64).await?;

        let mut owners = Vec::new();
        for friend in friend_ids.into_iter().take(MAX_FRIENDS_CHECKED) {
            match self.steam.get_owned_games(&friend).await {
                Ok(owned) if owned.owns(appid) => owners.push(friend),
                Ok(_) => {}
                Err(e) => debug!("Skipping friend {}: {}", friend, e),
            }
        }

        if owners.is_empty() {
            return Ok(Vec::new());
        }

        let owners = match self.steam.get_player_summaries(&owners).await {
            Ok(summaries) => owners
                .into_iter()
                .map(|steamid| {
                    let summary = summaries.iter().find(|p| p.steamid == steamid);
                    FriendOwner {
                        persona: summary.and_then(|p| p.personaname.clone()),
                        avatar: summary.and_then(|p| p.avatarfull.clone()),
                        steamid,
                    }
                })
                .collect(),
            Err(e) => {
                warn!("Friend summaries unavailable: {}", e);
                owners.into_iter().map(FriendOwner::from_id).collect()
            }
        };
        Ok(owners)
    }

    /// Resync from Steam and drop the cached library listing
    pub async fn force_sync(&self, profile_id: i64) -> Result<SyncSummary> {
        let summary = self.sync.sync_library(profile_id).await?;
        self.cache.delete(&CacheKey::library(profile_id)).await;
        Ok(summary)
    }
}
