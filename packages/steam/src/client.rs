// ABOUTME: HTTP client for the keyed Steam Web API and the public storefront
// ABOUTME: Normalizes transport and non-2xx failures into SteamApiError; storefront calls never fail

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::types::{
    Envelope, FriendListEnvelope, LevelResponse, OwnedGames, PlayerCountResponse, PlayerSummary,
    PlayersResponse, StoreAppDetails, StoreEntry,
};
use steamfolio_config::SteamConfig;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const STORE_COUNTRY: &str = "us";
const STORE_LANGUAGE: &str = "en";

#[derive(Debug, Error)]
pub enum SteamApiError {
    #[error("Steam API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Steam API error {status} on {url}\nBody: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Failed to parse Steam API response: {0}")]
    Decode(String),
}

pub type SteamApiResult<T> = Result<T, SteamApiError>;

/// Client for the Steam Web API (keyed) and storefront (unauthenticated)
#[derive(Clone)]
pub struct SteamClient {
    client: Client,
    config: SteamConfig,
}

impl SteamClient {
    pub fn new(config: SteamConfig) -> SteamApiResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, config })
    }

    // --- Players / Accounts ---

    /// Summaries for one or more Steam IDs; unknown IDs are simply absent from the result
    pub async fn get_player_summaries<S: AsRef<str>>(
        &self,
        steamids: &[S],
    ) -> SteamApiResult<Vec<PlayerSummary>> {
        if steamids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = steamids
            .iter()
            .map(|id| id.as_ref())
            .collect::<Vec<_>>()
            .join(",");

        let envelope: Envelope<PlayersResponse> = self
            .get_keyed("ISteamUser/GetPlayerSummaries/v2", &[("steamids", ids)])
            .await?;

        Ok(envelope.response.players)
    }

    /// Steam level, 0 when the response carries none
    pub async fn get_steam_level(&self, steamid: &str) -> SteamApiResult<i64> {
        let envelope: Envelope<LevelResponse> = self
            .get_keyed(
                "IPlayerService/GetSteamLevel/v1",
                &[("steamid", steamid.to_string())],
            )
            .await?;

        Ok(envelope.response.player_level.unwrap_or(0))
    }

    /// Friend Steam IDs, subject to the user's privacy settings
    pub async fn get_friend_steamids(&self, steamid: &str) -> SteamApiResult<Vec<String>> {
        let envelope: FriendListEnvelope = self
            .get_keyed(
                "ISteamUser/GetFriendList/v1",
                &[
                    ("steamid", steamid.to_string()),
                    ("relationship", "friend".to_string()),
                ],
            )
            .await?;

        Ok(envelope
            .friendslist
            .friends
            .unwrap_or_default()
            .into_iter()
            .filter_map(|friend| friend.steamid.filter(|id| !id.is_empty()))
            .collect())
    }

    // --- Library / Stats ---

    /// Owned games including app info, free games played, unplayed titles and unvetted apps
    pub async fn get_owned_games(&self, steamid: &str) -> SteamApiResult<OwnedGames> {
        let envelope: Envelope<OwnedGames> = self
            .get_keyed(
                "IPlayerService/GetOwnedGames/v1",
                &[
                    ("steamid", steamid.to_string()),
                    ("include_appinfo", "1".to_string()),
                    ("include_played_free_games", "1".to_string()),
                    ("include_unplayed", "1".to_string()),
                    ("skip_unvetted_apps", "0".to_string()),
                ],
            )
            .await?;

        debug!(
            "Owned games for {}: {} titles",
            steamid,
            envelope.response.games().len()
        );
        Ok(envelope.response)
    }

    /// Concurrent players right now; 0 on any failure
    pub async fn get_number_of_current_players(&self, appid: i64) -> u64 {
        match self.fetch_current_players(appid).await {
            Ok(count) => count,
            Err(e) => {
                warn!("Player count lookup for app {} failed: {}", appid, e);
                0
            }
        }
    }

    async fn fetch_current_players(&self, appid: i64) -> SteamApiResult<u64> {
        let url = format!(
            "{}/ISteamUserStats/GetNumberOfCurrentPlayers/v1",
            self.config.api_base_url
        );

        let response = self
            .client
            .get(&url)
            .query(&[("appid", appid.to_string())])
            .timeout(self.config.player_count_timeout)
            .send()
            .await?;

        let envelope: Envelope<PlayerCountResponse> = decode(check_status(response).await?).await?;
        Ok(envelope.response.player_count.unwrap_or(0))
    }

    // --- Storefront Metadata (no API key required) ---

    /// Storefront metadata; the empty default when the store has no data or the call fails
    pub async fn get_store_app_details(&self, appid: i64) -> StoreAppDetails {
        match self.fetch_store_app_details(appid).await {
            Ok(Some(details)) => details,
            Ok(None) => {
                debug!("Storefront has no details for app {}", appid);
                StoreAppDetails::default()
            }
            Err(e) => {
                warn!("Storefront lookup for app {} failed: {}", appid, e);
                StoreAppDetails::default()
            }
        }
    }

    async fn fetch_store_app_details(&self, appid: i64) -> SteamApiResult<Option<StoreAppDetails>> {
        let url = format!("{}/api/appdetails", self.config.store_base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("appids", appid.to_string()),
                ("cc", STORE_COUNTRY.to_string()),
                ("l", STORE_LANGUAGE.to_string()),
            ])
            .timeout(self.config.store_timeout)
            .send()
            .await?;

        let mut payload: HashMap<String, Option<StoreEntry>> =
            decode(check_status(response).await?).await?;

        Ok(payload
            .remove(&appid.to_string())
            .flatten()
            .filter(|entry| entry.success)
            .and_then(|entry| entry.data))
    }

    /// GET against the keyed Web API with the configured timeout
    async fn get_keyed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> SteamApiResult<T> {
        let url = format!("{}/{}", self.config.api_base_url, path);
        info!("Steam API request: {}", path);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .query(params)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!(
                        "Steam API request {} timed out after {:?}",
                        path, self.config.request_timeout
                    );
                } else {
                    error!("Steam API request {} failed: {}", path, e);
                }
                SteamApiError::Request(e)
            })?;

        decode(check_status(response).await?).await
    }
}

/// Turn a non-2xx response into `SteamApiError::Status`, keeping the body for diagnosis
async fn check_status(response: Response) -> SteamApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // Never echo the query string: it carries the API key
    let mut url = response.url().clone();
    url.set_query(None);

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    error!("Steam API error: {} on {} - {}", status, url, body);

    Err(SteamApiError::Status {
        status: status.as_u16(),
        url: url.to_string(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> SteamApiResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| SteamApiError::Decode(e.to_string()))
}
