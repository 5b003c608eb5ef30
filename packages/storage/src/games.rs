// ABOUTME: Game catalog storage using SQLite
// ABOUTME: Idempotent appid-keyed upserts that never downgrade a known name to "Unknown"

use sqlx::SqlitePool;
use tracing::debug;

use crate::StorageResult;
use steamfolio_core::{Game, UNKNOWN_GAME_NAME};

pub struct GameStorage {
    pool: SqlitePool,
}

impl GameStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the game, or rename it when `name` is a real name that differs from the stored one
    pub async fn upsert_game(&self, appid: i64, name: &str) -> StorageResult<()> {
        debug!("Upserting game {} ({})", appid, name);

        sqlx::query(
            r#"
            INSERT INTO games (appid, name)
            VALUES (?, ?)
            ON CONFLICT(appid) DO UPDATE SET
                name = excluded.name
            WHERE excluded.name != ? AND games.name != excluded.name
            "#,
        )
        .bind(appid)
        .bind(name)
        .bind(UNKNOWN_GAME_NAME)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_game(&self, appid: i64) -> StorageResult<Option<Game>> {
        let game = sqlx::query_as::<_, (i64, String)>("SELECT appid, name FROM games WHERE appid = ?")
            .bind(appid)
            .fetch_optional(&self.pool)
            .await?
            .map(|(appid, name)| Game { appid, name });

        Ok(game)
    }

    pub async fn count_games(&self) -> StorageResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM games")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
