// ABOUTME: Profile storage layer using SQLite
// ABOUTME: Links site users to Steam identities and persists synced profile metadata

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::{StorageError, StorageResult};
use steamfolio_core::Profile;

pub struct ProfileStorage {
    pool: SqlitePool,
}

impl ProfileStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_profile(&self, profile_id: i64) -> StorageResult<Profile> {
        debug!("Fetching profile: {}", profile_id);

        let row = sqlx::query("SELECT * FROM profiles WHERE id = ?")
            .bind(profile_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Profile {}", profile_id)))?;

        self.row_to_profile(&row)
    }

    pub async fn find_by_user(&self, user_id: &str) -> StorageResult<Option<Profile>> {
        let row = sqlx::query("SELECT * FROM profiles WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| self.row_to_profile(&row)).transpose()
    }

    /// Return the user's profile, creating it with `steamid64` on first login.
    ///
    /// An existing profile keeps its Steam ID. The boolean is true when a row was created.
    pub async fn get_or_create_for_user(
        &self,
        user_id: &str,
        steamid64: &str,
    ) -> StorageResult<(Profile, bool)> {
        let result = sqlx::query(
            r#"
            INSERT INTO profiles (user_id, steamid64)
            VALUES (?, ?)
            ON CONFLICT(user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(steamid64)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let steamid_taken = e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation());
            if steamid_taken {
                StorageError::DuplicateSteamId(steamid64.to_string())
            } else {
                StorageError::Sqlx(e)
            }
        })?;

        let created = result.rows_affected() > 0;
        if created {
            info!("Created profile for user {} (steam {})", user_id, steamid64);
        }

        let profile = self
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Profile for user {}", user_id)))?;

        Ok((profile, created))
    }

    /// Persist the sync-owned fields of a profile
    pub async fn save_profile(&self, profile: &Profile) -> StorageResult<()> {
        debug!("Saving profile: {}", profile.id);

        let last_synced = profile.last_synced.map(|ts| ts.to_rfc3339());

        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET persona = ?, avatar = ?, level = ?, last_synced = ?
            WHERE id = ?
            "#,
        )
        .bind(&profile.persona)
        .bind(&profile.avatar)
        .bind(profile.level)
        .bind(&last_synced)
        .bind(profile.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("Profile {}", profile.id)));
        }

        Ok(())
    }

    /// Delete a profile; its library and achievement rows go with it
    pub async fn delete_profile(&self, profile_id: i64) -> StorageResult<()> {
        info!("Deleting profile: {}", profile_id);

        let result = sqlx::query("DELETE FROM profiles WHERE id = ?")
            .bind(profile_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("Profile {}", profile_id)));
        }

        Ok(())
    }

    fn row_to_profile(&self, row: &sqlx::sqlite::SqliteRow) -> StorageResult<Profile> {
        let last_synced = row
            .try_get::<Option<String>, _>("last_synced")?
            .map(|value| {
                DateTime::parse_from_rfc3339(&value)
                    .map(|ts| ts.with_timezone(&Utc))
                    .map_err(|_| StorageError::InvalidTimestamp {
                        column: "last_synced",
                        value,
                    })
            })
            .transpose()?;

        Ok(Profile {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            steamid64: row.try_get("steamid64")?,
            persona: row.try_get("persona")?,
            avatar: row.try_get("avatar")?,
            level: row.try_get("level")?,
            last_synced,
        })
    }
}
