// ABOUTME: Response payloads for the Steam Web API and storefront
// ABOUTME: Lenient serde models where every field the API may omit has a default

use serde::{Deserialize, Serialize};

/// `{"response": {...}}` wrapper used by most Web API interfaces
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T: Default> {
    #[serde(default)]
    pub response: T,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlayersResponse {
    #[serde(default)]
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub steamid: String,
    #[serde(default)]
    pub personaname: Option<String>,
    #[serde(default)]
    pub avatarfull: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LevelResponse {
    #[serde(default)]
    pub player_level: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FriendListEnvelope {
    #[serde(default)]
    pub friendslist: FriendList,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FriendList {
    #[serde(default)]
    pub friends: Option<Vec<Friend>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Friend {
    #[serde(default)]
    pub steamid: Option<String>,
}

/// One title from `GetOwnedGames`; appid and name may be absent for delisted apps
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct OwnedGame {
    #[serde(default)]
    pub appid: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub playtime_forever: i64,
    #[serde(default)]
    pub playtime_2weeks: i64,
    #[serde(default)]
    pub rtime_last_played: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct OwnedGames {
    #[serde(default)]
    pub game_count: u32,
    #[serde(default)]
    games: Option<Vec<OwnedGame>>,
}

impl OwnedGames {
    /// Owned titles; a private or empty library yields an empty slice
    pub fn games(&self) -> &[OwnedGame] {
        self.games.as_deref().unwrap_or_default()
    }

    pub fn owns(&self, appid: i64) -> bool {
        self.games().iter().any(|g| g.appid == Some(appid))
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlayerCountResponse {
    #[serde(default)]
    pub player_count: Option<u64>,
}

/// Entry in the storefront `appdetails` map, keyed by appid string
#[derive(Debug, Deserialize)]
pub(crate) struct StoreEntry {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<StoreAppDetails>,
}

/// Storefront metadata for an app. `Default` is the empty value used when the store has nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreAppDetails {
    pub name: Option<String>,
    pub steam_appid: Option<i64>,
    pub short_description: Option<String>,
    pub header_image: Option<String>,
    pub website: Option<String>,
    pub is_free: bool,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    pub genres: Vec<Genre>,
    pub release_date: Option<ReleaseDate>,
    pub screenshots: Vec<Screenshot>,
}

impl StoreAppDetails {
    pub fn is_empty(&self) -> bool {
        *self == StoreAppDetails::default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Genre {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseDate {
    pub coming_soon: bool,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Screenshot {
    pub id: i64,
    pub path_thumbnail: String,
    pub path_full: String,
}
