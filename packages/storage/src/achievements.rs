// ABOUTME: Achievement storage using SQLite
// ABOUTME: Per-app achievement definitions and per-profile unlock state

use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::StorageResult;
use steamfolio_core::{Achievement, UserAchievement};

/// Definition fields written for an (appid, apiname) pair
#[derive(Debug, Clone, Default)]
pub struct AchievementInput {
    pub appid: i64,
    pub apiname: String,
    pub displayname: String,
    pub description: String,
    pub icon: String,
    pub icongray: String,
}

#[derive(FromRow)]
struct AchievementRow {
    id: i64,
    appid: i64,
    apiname: String,
    displayname: String,
    description: String,
    icon: String,
    icongray: String,
}

#[derive(FromRow)]
struct UserAchievementRow {
    id: i64,
    profile_id: i64,
    appid: i64,
    apiname: String,
    achieved: bool,
    unlocktime: i64,
}

pub struct AchievementStorage {
    pool: SqlitePool,
}

impl AchievementStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn upsert_achievement(&self, input: &AchievementInput) -> StorageResult<()> {
        debug!("Upserting achievement {}:{}", input.appid, input.apiname);

        sqlx::query(
            r#"
            INSERT INTO achievements (appid, apiname, displayname, description, icon, icongray)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(appid, apiname) DO UPDATE SET
                displayname = excluded.displayname,
                description = excluded.description,
                icon = excluded.icon,
                icongray = excluded.icongray
            "#,
        )
        .bind(input.appid)
        .bind(&input.apiname)
        .bind(&input.displayname)
        .bind(&input.description)
        .bind(&input.icon)
        .bind(&input.icongray)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_achievements(&self, appid: i64) -> StorageResult<Vec<Achievement>> {
        let rows = sqlx::query_as::<_, AchievementRow>(
            "SELECT * FROM achievements WHERE appid = ? ORDER BY apiname",
        )
        .bind(appid)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Achievement {
                id: row.id,
                appid: row.appid,
                apiname: row.apiname,
                displayname: row.displayname,
                description: row.description,
                icon: row.icon,
                icongray: row.icongray,
            })
            .collect())
    }

    pub async fn upsert_user_achievement(
        &self,
        profile_id: i64,
        appid: i64,
        apiname: &str,
        achieved: bool,
        unlocktime: i64,
    ) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_achievements (profile_id, appid, apiname, achieved, unlocktime)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(profile_id, appid, apiname) DO UPDATE SET
                achieved = excluded.achieved,
                unlocktime = excluded.unlocktime
            "#,
        )
        .bind(profile_id)
        .bind(appid)
        .bind(apiname)
        .bind(achieved)
        .bind(unlocktime)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_user_achievements(
        &self,
        profile_id: i64,
        appid: i64,
    ) -> StorageResult<Vec<UserAchievement>> {
        let rows = sqlx::query_as::<_, UserAchievementRow>(
            r#"
            SELECT id, profile_id, appid, apiname, achieved, unlocktime
            FROM user_achievements
            WHERE profile_id = ? AND appid = ?
            ORDER BY apiname
            "#,
        )
        .bind(profile_id)
        .bind(appid)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| UserAchievement {
                id: row.id,
                profile_id: row.profile_id,
                appid: row.appid,
                apiname: row.apiname,
                achieved: row.achieved,
                unlocktime: row.unlocktime,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;
    use crate::ProfileStorage;

    #[tokio::test]
    async fn test_achievement_unique_per_app_and_apiname() {
        let pool = connect_in_memory().await.unwrap();
        let storage = AchievementStorage::new(pool);

        let mut input = AchievementInput {
            appid: 440,
            apiname: "TF_PLAY_GAME_EVERYCLASS".to_string(),
            displayname: "Head of the Class".to_string(),
            ..Default::default()
        };
        storage.upsert_achievement(&input).await.unwrap();

        input.description = "Play a complete round with every class.".to_string();
        storage.upsert_achievement(&input).await.unwrap();

        // Same apiname under a different app is a separate definition
        input.appid = 620;
        storage.upsert_achievement(&input).await.unwrap();

        let tf2 = storage.list_achievements(440).await.unwrap();
        assert_eq!(tf2.len(), 1);
        assert_eq!(tf2[0].description, "Play a complete round with every class.");
        assert_eq!(storage.list_achievements(620).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_user_achievement_upsert() {
        let pool = connect_in_memory().await.unwrap();
        let (profile, _) = ProfileStorage::new(pool.clone())
            .get_or_create_for_user("alice", "76561197960287930")
            .await
            .unwrap();
        let storage = AchievementStorage::new(pool);

        storage
            .upsert_user_achievement(profile.id, 440, "TF_WIN", false, 0)
            .await
            .unwrap();
        storage
            .upsert_user_achievement(profile.id, 440, "TF_WIN", true, 1_700_000_000)
            .await
            .unwrap();

        let unlocked = storage.list_user_achievements(profile.id, 440).await.unwrap();
        assert_eq!(unlocked.len(), 1);
        assert!(unlocked[0].achieved);
        assert_eq!(unlocked[0].unlocktime, 1_700_000_000);
    }
}
