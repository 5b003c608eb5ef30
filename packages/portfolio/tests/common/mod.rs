// ABOUTME: Common test utilities for portfolio integration tests
// ABOUTME: Mock Steam server, in-memory database, and canned Web API responses

#![allow(dead_code)]

use serde_json::{json, Value};
use sqlx::SqlitePool;
use steamfolio_config::SteamConfig;
use steamfolio_steam::SteamClient;
use steamfolio_storage::connect_in_memory;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USER_ID: &str = "alice";
pub const STEAM_ID: &str = "76561197960287930";

pub const OWNED_GAMES_PATH: &str = "/IPlayerService/GetOwnedGames/v1";
pub const SUMMARIES_PATH: &str = "/ISteamUser/GetPlayerSummaries/v2";
pub const LEVEL_PATH: &str = "/IPlayerService/GetSteamLevel/v1";
pub const FRIENDS_PATH: &str = "/ISteamUser/GetFriendList/v1";
pub const PLAYER_COUNT_PATH: &str = "/ISteamUserStats/GetNumberOfCurrentPlayers/v1";
pub const STORE_PATH: &str = "/api/appdetails";

/// Test context with a mock Steam server and a migrated in-memory database
pub struct TestContext {
    pub server: MockServer,
    pub pool: SqlitePool,
    pub steam: SteamClient,
}

pub async fn setup() -> TestContext {
    let server = MockServer::start().await;
    let pool = connect_in_memory()
        .await
        .expect("Failed to create in-memory database");
    let steam = SteamClient::new(SteamConfig::new("test-key").with_base_url(server.uri()))
        .expect("Failed to build Steam client");

    TestContext {
        server,
        pool,
        steam,
    }
}

/// Summary and level responses for `steamid`
pub async fn mount_profile(server: &MockServer, steamid: &str, persona: &str, level: i64) {
    Mock::given(method("GET"))
        .and(path(SUMMARIES_PATH))
        .and(query_param("steamids", steamid))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"players": [{
                "steamid": steamid,
                "personaname": persona,
                "avatarfull": format!("https://avatars.example/{}.jpg", persona)
            }]}
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(LEVEL_PATH))
        .and(query_param("steamid", steamid))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"response": {"player_level": level}})),
        )
        .mount(server)
        .await;
}

pub async fn mount_owned_games(server: &MockServer, steamid: &str, games: Value) {
    Mock::given(method("GET"))
        .and(path(OWNED_GAMES_PATH))
        .and(query_param("steamid", steamid))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"game_count": games.as_array().map_or(0, |g| g.len()), "games": games}
        })))
        .mount(server)
        .await;
}

pub async fn mount_failure(server: &MockServer, endpoint: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(status).set_body_string("upstream unavailable"))
        .mount(server)
        .await;
}

/// Number of requests the mock server received for `endpoint`
pub async fn request_count(server: &MockServer, endpoint: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|req| req.url.path() == endpoint)
        .count()
}
