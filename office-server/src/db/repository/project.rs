//! Project Repository

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, page_window, parse_record_id};
use crate::db::models::{
    ClientId, EmployeeId, Project, ProjectPriority, ProjectStats, ProjectStatus, UserId,
};
use crate::utils::time;

/// `GET /projects` 查询过滤条件
#[derive(Debug, Default)]
pub struct ProjectFilter {
    pub q: Option<String>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<ProjectPriority>,
    pub client: Option<ClientId>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// 创建/整体更新时由 handler 组装好的字段集合
#[derive(Debug, Clone, Default)]
pub struct ProjectWrite {
    pub description: Option<String>,
    pub client: Option<ClientId>,
    pub team: Vec<EmployeeId>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub priority: ProjectPriority,
    pub budget: f64,
}

#[derive(Clone)]
pub struct ProjectRepository {
    base: BaseRepository,
}

impl ProjectRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find project by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Project>> {
        let thing = parse_record_id(id)?;
        let project: Option<Project> = self.base.db().select(thing).await?;
        Ok(project)
    }

    /// Create a project
    pub async fn create(
        &self,
        name: String,
        write: ProjectWrite,
        created_by: UserId,
    ) -> RepoResult<Project> {
        let now = time::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE project SET
                    name = $name,
                    description = $description,
                    client = $client,
                    team = $team,
                    startDate = $start_date,
                    endDate = $end_date,
                    priority = $priority,
                    budget = $budget,
                    status = 'active',
                    createdBy = $created_by,
                    assignedBy = $created_by,
                    createdAt = $now,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("name", name))
            .bind(("description", write.description))
            .bind(("client", write.client))
            .bind(("team", write.team))
            .bind(("start_date", write.start_date))
            .bind(("end_date", write.end_date))
            .bind(("priority", write.priority))
            .bind(("budget", write.budget))
            .bind(("created_by", created_by))
            .bind(("now", now))
            .await?;

        result
            .take::<Option<Project>>(0)?
            .ok_or_else(|| RepoError::Database("Failed to create project".to_string()))
    }

    /// List projects; soft-deleted (inactive) hidden unless asked for
    pub async fn list(&self, filter: ProjectFilter) -> RepoResult<(Vec<Project>, usize)> {
        let (_, limit, start) = page_window(filter.page, filter.limit, 10);

        let mut clauses: Vec<&str> = Vec::new();
        if filter.status.is_some() {
            clauses.push("status = $status");
        } else {
            clauses.push("status != 'inactive'");
        }
        if filter.priority.is_some() {
            clauses.push("priority = $priority");
        }
        if filter.client.is_some() {
            clauses.push("client = $client");
        }
        if filter.q.is_some() {
            clauses.push(
                "(string::lowercase(name) CONTAINS $q \
                 OR string::lowercase(description OR '') CONTAINS $q)",
            );
        }
        let where_clause = format!(" WHERE {}", clauses.join(" AND "));

        let sql = format!(
            "SELECT count() AS total FROM project{where_clause} GROUP ALL; \
             SELECT * FROM project{where_clause} ORDER BY createdAt DESC LIMIT {limit} START {start}"
        );

        let mut qb = self.base.db().query(sql);
        if let Some(status) = filter.status {
            qb = qb.bind(("status", status));
        }
        if let Some(priority) = filter.priority {
            qb = qb.bind(("priority", priority));
        }
        if let Some(client) = filter.client {
            qb = qb.bind(("client", client));
        }
        if let Some(q) = filter.q {
            qb = qb.bind(("q", q.to_lowercase()));
        }

        let mut result = qb.await?;
        let total = result
            .take::<Option<CountRow>>(0)?
            .map(|c| c.total)
            .unwrap_or(0);
        let projects: Vec<Project> = result.take(1)?;
        Ok((projects, total))
    }

    /// `GET /projects/stats` 的看板计数，软删记录不计入
    pub async fn stats(&self) -> RepoResult<ProjectStats> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT count() AS totalProjects, \
                        count(status = 'active') AS active, \
                        count(status = 'completed') AS completed, \
                        count(priority = 'urgent') AS urgent \
                 FROM project WHERE status != 'inactive' GROUP ALL",
            )
            .await?;
        let stats = result
            .take::<Option<ProjectStats>>(0)?
            .unwrap_or_default();
        Ok(stats)
    }

    /// Update project fields that appear in the payload
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: &RecordId,
        name: Option<String>,
        description: Option<String>,
        client: Option<ClientId>,
        team: Option<Vec<EmployeeId>>,
        start_date: Option<i64>,
        end_date: Option<i64>,
        priority: Option<ProjectPriority>,
        budget: Option<f64>,
        status: Option<ProjectStatus>,
    ) -> RepoResult<Project> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    description = $description OR description,
                    client = IF $has_client THEN $client ELSE client END,
                    team = IF $has_team THEN $team ELSE team END,
                    startDate = IF $has_start THEN $start_date ELSE startDate END,
                    endDate = IF $has_end THEN $end_date ELSE endDate END,
                    priority = IF $has_priority THEN $priority ELSE priority END,
                    budget = IF $has_budget THEN $budget ELSE budget END,
                    status = IF $has_status THEN $status ELSE status END,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("thing", id.clone()))
            .bind(("name", name))
            .bind(("description", description))
            .bind(("has_client", client.is_some()))
            .bind(("client", client))
            .bind(("has_team", team.is_some()))
            .bind(("team", team))
            .bind(("has_start", start_date.is_some()))
            .bind(("start_date", start_date))
            .bind(("has_end", end_date.is_some()))
            .bind(("end_date", end_date))
            .bind(("has_priority", priority.is_some()))
            .bind(("priority", priority))
            .bind(("has_budget", budget.is_some()))
            .bind(("budget", budget))
            .bind(("has_status", status.is_some()))
            .bind(("status", status))
            .bind(("now", time::now_millis()))
            .await?;

        result
            .take::<Option<Project>>(0)?
            .ok_or_else(|| RepoError::NotFound("Project not found".to_string()))
    }

    /// Soft delete (status → inactive)
    pub async fn soft_delete(&self, id: &RecordId) -> RepoResult<Project> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = 'inactive', updatedAt = $now RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("now", time::now_millis()))
            .await?;
        result
            .take::<Option<Project>>(0)?
            .ok_or_else(|| RepoError::NotFound("Project not found".to_string()))
    }
}
