// ABOUTME: Data layer and persistence for Steamfolio
// ABOUTME: SQLite pool setup, migrations, and storage for profiles, games, libraries and achievements

use thiserror::Error;

pub mod achievements;
pub mod db;
pub mod games;
pub mod library;
pub mod profiles;

pub use achievements::{AchievementInput, AchievementStorage};
pub use db::{connect, connect_in_memory, run_migrations};
pub use games::GameStorage;
pub use library::LibraryStorage;
pub use profiles::ProfileStorage;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Invalid timestamp in column {column}: {value}")]
    InvalidTimestamp { column: &'static str, value: String },
    #[error("{0} not found")]
    NotFound(String),
    #[error("Steam ID {0} is already linked to another user")]
    DuplicateSteamId(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}
