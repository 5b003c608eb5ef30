// ABOUTME: Database connection management and migrations
// ABOUTME: Opens the SQLite pool with WAL and foreign keys, then applies embedded migrations

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::{StorageError, StorageResult};

const MAX_CONNECTIONS: u32 = 10;
const BUSY_TIMEOUT_SECS: u64 = 30;

/// Open (creating if needed) the database at `database_path` and run migrations
pub async fn connect(database_path: &Path) -> StorageResult<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = database_path.parent() {
        std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
    }

    let database_url = format!("sqlite:{}", database_path.display());
    debug!("Connecting to database: {}", database_url);

    let options = SqliteConnectOptions::from_str(&database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(BUSY_TIMEOUT_SECS));

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(BUSY_TIMEOUT_SECS))
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    info!("Database ready at {}", database_path.display());

    Ok(pool)
}

/// Single-connection in-memory database with migrations applied.
///
/// Every pooled connection to `:memory:` would see its own empty database, so the
/// pool is pinned to one connection that never expires.
pub async fn connect_in_memory() -> StorageResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> StorageResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
