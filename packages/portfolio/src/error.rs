// ABOUTME: Error types for the portfolio package
// ABOUTME: Sync failures and the service-level errors the API maps to status codes

use steamfolio_steam::SteamApiError;
use steamfolio_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Steam API error: {0}")]
    Steam(#[from] SteamApiError),
}

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(i64),

    #[error("App {appid} is not in the library of profile {profile_id}")]
    GameNotInLibrary { profile_id: i64, appid: i64 },

    #[error("Steam ID {0} is already linked to another user")]
    SteamIdTaken(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),

    #[error("Steam API error: {0}")]
    Steam(#[from] SteamApiError),
}

pub type Result<T> = std::result::Result<T, PortfolioError>;

impl From<StorageError> for PortfolioError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateSteamId(steamid) => PortfolioError::SteamIdTaken(steamid),
            other => PortfolioError::Storage(other),
        }
    }
}

impl From<SyncError> for PortfolioError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::ProfileNotFound(id) => PortfolioError::ProfileNotFound(id),
            SyncError::Storage(e) => e.into(),
            SyncError::Steam(e) => PortfolioError::Steam(e),
        }
    }
}
