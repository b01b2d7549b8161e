//! System Settings Repository
//!
//! 单例记录，首次读取时惰性创建。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Setting, SettingUpdate, UserId};
use crate::utils::time;

#[derive(Clone)]
pub struct SettingRepository {
    base: BaseRepository,
}

impl SettingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Get the settings singleton, creating it on first access
    pub async fn get_or_create(&self) -> RepoResult<Setting> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM setting LIMIT 1")
            .await?;
        let settings: Vec<Setting> = result.take(0)?;
        if let Some(setting) = settings.into_iter().next() {
            return Ok(setting);
        }

        let mut result = self
            .base
            .db()
            .query("CREATE setting SET status = 'active', updatedAt = $now RETURN AFTER")
            .bind(("now", time::now_millis()))
            .await?;
        result
            .take::<Option<Setting>>(0)?
            .ok_or_else(|| RepoError::Database("Failed to create settings".to_string()))
    }

    /// Merge the present fields into the singleton
    pub async fn update(&self, patch: SettingUpdate, updated_by: UserId) -> RepoResult<Setting> {
        let current = self.get_or_create().await?;
        let thing = current
            .id
            .ok_or_else(|| RepoError::Database("Settings record has no id".to_string()))?;

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing MERGE $patch; \
                 UPDATE $thing SET updatedBy = $updated_by, updatedAt = $now RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("patch", patch))
            .bind(("updated_by", updated_by))
            .bind(("now", time::now_millis()))
            .await?;

        result
            .take::<Option<Setting>>(1)?
            .ok_or_else(|| RepoError::NotFound("Settings not found".to_string()))
    }
}
