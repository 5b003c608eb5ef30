// ABOUTME: Per-profile library storage using SQLite
// ABOUTME: Upserts playtime snapshots and reads the library joined with game names

use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::StorageResult;
use steamfolio_core::{LibraryEntry, PlaytimeSnapshot, UserGame};

#[derive(FromRow)]
struct LibraryRow {
    appid: i64,
    name: String,
    playtime_forever: i64,
    playtime_2weeks: i64,
    rtime_last_played: i64,
}

impl From<LibraryRow> for LibraryEntry {
    fn from(row: LibraryRow) -> Self {
        LibraryEntry {
            appid: row.appid,
            name: row.name,
            playtime_forever: row.playtime_forever,
            playtime_2weeks: row.playtime_2weeks,
            rtime_last_played: row.rtime_last_played,
        }
    }
}

pub struct LibraryStorage {
    pool: SqlitePool,
}

impl LibraryStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Replace the stored snapshot for (profile, game). The game row must already exist.
    pub async fn upsert_user_game(
        &self,
        profile_id: i64,
        appid: i64,
        snapshot: PlaytimeSnapshot,
    ) -> StorageResult<()> {
        debug!(
            "Upserting user game: profile={} appid={} forever={}",
            profile_id, appid, snapshot.playtime_forever
        );

        sqlx::query(
            r#"
            INSERT INTO user_games (
                profile_id, appid, playtime_forever, playtime_2weeks, rtime_last_played
            ) VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(profile_id, appid) DO UPDATE SET
                playtime_forever = excluded.playtime_forever,
                playtime_2weeks = excluded.playtime_2weeks,
                rtime_last_played = excluded.rtime_last_played
            "#,
        )
        .bind(profile_id)
        .bind(appid)
        .bind(snapshot.playtime_forever)
        .bind(snapshot.playtime_2weeks)
        .bind(snapshot.rtime_last_played)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_user_game(&self, profile_id: i64, appid: i64) -> StorageResult<Option<UserGame>> {
        let row = sqlx::query_as::<_, (i64, i64, i64, i64, i64, i64)>(
            r#"
            SELECT id, profile_id, appid, playtime_forever, playtime_2weeks, rtime_last_played
            FROM user_games
            WHERE profile_id = ? AND appid = ?
            "#,
        )
        .bind(profile_id)
        .bind(appid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(
            |(id, profile_id, appid, playtime_forever, playtime_2weeks, rtime_last_played)| UserGame {
                id,
                profile_id,
                appid,
                playtime_forever,
                playtime_2weeks,
                rtime_last_played,
            },
        ))
    }

    /// The profile's library, most played first
    pub async fn list_library(&self, profile_id: i64) -> StorageResult<Vec<LibraryEntry>> {
        debug!("Listing library for profile: {}", profile_id);

        let rows = sqlx::query_as::<_, LibraryRow>(
            r#"
            SELECT g.appid, g.name, ug.playtime_forever, ug.playtime_2weeks, ug.rtime_last_played
            FROM user_games ug
            JOIN games g ON g.appid = ug.appid
            WHERE ug.profile_id = ?
            ORDER BY ug.playtime_forever DESC, g.appid ASC
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LibraryEntry::from).collect())
    }

    /// A single owned game joined with its name, if the profile owns it
    pub async fn find_library_entry(
        &self,
        profile_id: i64,
        appid: i64,
    ) -> StorageResult<Option<LibraryEntry>> {
        let row = sqlx::query_as::<_, LibraryRow>(
            r#"
            SELECT g.appid, g.name, ug.playtime_forever, ug.playtime_2weeks, ug.rtime_last_played
            FROM user_games ug
            JOIN games g ON g.appid = ug.appid
            WHERE ug.profile_id = ? AND ug.appid = ?
            "#,
        )
        .bind(profile_id)
        .bind(appid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(LibraryEntry::from))
    }

    pub async fn count_user_games(&self, profile_id: i64) -> StorageResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM user_games WHERE profile_id = ?")
            .bind(profile_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
