//! Activity Audit Log Repository
//!
//! 审计日志只追加，由后台 worker 异步写入；查询侧支持
//! 模块/动作/操作者/时间窗过滤。

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, page_window};
use crate::db::models::{Activity, ActivityAction, UserId};
use crate::utils::time;

/// `GET /activities` 查询过滤条件
#[derive(Debug, Default)]
pub struct ActivityFilter {
    pub module: Option<String>,
    pub action: Option<ActivityAction>,
    pub performed_by: Option<UserId>,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// 待写入的审计条目
#[derive(Debug, Clone)]
pub struct ActivityWrite {
    pub action: ActivityAction,
    pub module: String,
    pub description: String,
    pub performed_by: UserId,
    pub target_id: Option<String>,
    pub target_model: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Clone)]
pub struct ActivityRepository {
    base: BaseRepository,
}

impl ActivityRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append an audit entry
    pub async fn append(&self, write: ActivityWrite) -> RepoResult<Activity> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE activity SET
                    action = $action,
                    module = $module,
                    description = $description,
                    performedBy = $performed_by,
                    targetId = $target_id,
                    targetModel = $target_model,
                    ipAddress = $ip_address,
                    userAgent = $user_agent,
                    status = 'active',
                    createdAt = $now
                RETURN AFTER"#,
            )
            .bind(("action", write.action))
            .bind(("module", write.module))
            .bind(("description", write.description))
            .bind(("performed_by", write.performed_by))
            .bind(("target_id", write.target_id))
            .bind(("target_model", write.target_model))
            .bind(("ip_address", write.ip_address))
            .bind(("user_agent", write.user_agent))
            .bind(("now", time::now_millis()))
            .await?;

        result
            .take::<Option<Activity>>(0)?
            .ok_or_else(|| RepoError::Database("Failed to append activity".to_string()))
    }

    /// List active entries with filters, newest first
    pub async fn list(&self, filter: ActivityFilter) -> RepoResult<(Vec<Activity>, usize)> {
        let (_, limit, start) = page_window(filter.page, filter.limit, 20);

        let mut clauses: Vec<&str> = vec!["status = 'active'"];
        if filter.module.is_some() {
            clauses.push("module = $module");
        }
        if filter.action.is_some() {
            clauses.push("action = $action");
        }
        if filter.performed_by.is_some() {
            clauses.push("performedBy = $performed_by");
        }
        if filter.from.is_some() {
            clauses.push("createdAt >= $from");
        }
        if filter.to.is_some() {
            clauses.push("createdAt < $to");
        }
        let where_clause = format!(" WHERE {}", clauses.join(" AND "));

        let sql = format!(
            "SELECT count() AS total FROM activity{where_clause} GROUP ALL; \
             SELECT * FROM activity{where_clause} ORDER BY createdAt DESC LIMIT {limit} START {start}"
        );

        let mut qb = self.base.db().query(sql);
        if let Some(module) = filter.module {
            qb = qb.bind(("module", module));
        }
        if let Some(action) = filter.action {
            qb = qb.bind(("action", action));
        }
        if let Some(performed_by) = filter.performed_by {
            qb = qb.bind(("performed_by", performed_by));
        }
        if let Some(from) = filter.from {
            qb = qb.bind(("from", from));
        }
        if let Some(to) = filter.to {
            qb = qb.bind(("to", to));
        }

        let mut result = qb.await?;
        let total = result
            .take::<Option<CountRow>>(0)?
            .map(|c| c.total)
            .unwrap_or(0);
        let activities: Vec<Activity> = result.take(1)?;
        Ok((activities, total))
    }

    /// Soft delete (status → inactive)
    pub async fn soft_delete(&self, id: &RecordId) -> RepoResult<Activity> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = 'inactive' RETURN AFTER")
            .bind(("thing", id.clone()))
            .await?;
        result
            .take::<Option<Activity>>(0)?
            .ok_or_else(|| RepoError::NotFound("Activity not found".to_string()))
    }
}
