//! Report Repository
//!
//! `data` 为自由形状 JSON；删除为永久删除。

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, page_window, parse_record_id};
use crate::db::models::{ClientId, EmployeeId, Report, UserId};
use crate::utils::time;

/// `GET /reports` 查询过滤条件
#[derive(Debug, Default)]
pub struct ReportFilter {
    pub report_type: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// 创建时由 handler 校验后组装的字段集合
#[derive(Debug, Clone)]
pub struct ReportWrite {
    pub report_type: String,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub project: Option<RecordId>,
    pub employee: Option<EmployeeId>,
    pub client: Option<ClientId>,
    pub data: serde_json::Value,
    pub remarks: Option<String>,
}

#[derive(Clone)]
pub struct ReportRepository {
    base: BaseRepository,
}

impl ReportRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find report by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Report>> {
        let thing = parse_record_id(id)?;
        let report: Option<Report> = self.base.db().select(thing).await?;
        Ok(report)
    }

    /// Create a report
    pub async fn create(&self, write: ReportWrite, generated_by: UserId) -> RepoResult<Report> {
        let now = time::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE report SET
                    reportType = $report_type,
                    month = $month,
                    year = $year,
                    project = $project,
                    employee = $employee,
                    client = $client,
                    data = $data,
                    remarks = $remarks,
                    generatedBy = $generated_by,
                    status = 'active',
                    createdAt = $now,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("report_type", write.report_type))
            .bind(("month", write.month))
            .bind(("year", write.year))
            .bind(("project", write.project))
            .bind(("employee", write.employee))
            .bind(("client", write.client))
            .bind(("data", write.data))
            .bind(("remarks", write.remarks))
            .bind(("generated_by", generated_by))
            .bind(("now", now))
            .await?;

        result
            .take::<Option<Report>>(0)?
            .ok_or_else(|| RepoError::Database("Failed to create report".to_string()))
    }

    /// List active reports with filters
    pub async fn list(&self, filter: ReportFilter) -> RepoResult<(Vec<Report>, usize)> {
        let (_, limit, start) = page_window(filter.page, filter.limit, 10);

        let mut clauses: Vec<&str> = vec!["status = 'active'"];
        if filter.report_type.is_some() {
            clauses.push("reportType = $report_type");
        }
        if filter.month.is_some() {
            clauses.push("month = $month");
        }
        if filter.year.is_some() {
            clauses.push("year = $year");
        }
        let where_clause = format!(" WHERE {}", clauses.join(" AND "));

        let sql = format!(
            "SELECT count() AS total FROM report{where_clause} GROUP ALL; \
             SELECT * FROM report{where_clause} ORDER BY createdAt DESC LIMIT {limit} START {start}"
        );

        let mut qb = self.base.db().query(sql);
        if let Some(report_type) = filter.report_type {
            qb = qb.bind(("report_type", report_type));
        }
        if let Some(month) = filter.month {
            qb = qb.bind(("month", month));
        }
        if let Some(year) = filter.year {
            qb = qb.bind(("year", year));
        }

        let mut result = qb.await?;
        let total = result
            .take::<Option<CountRow>>(0)?
            .map(|c| c.total)
            .unwrap_or(0);
        let reports: Vec<Report> = result.take(1)?;
        Ok((reports, total))
    }

    /// Update report fields that appear in the payload
    pub async fn update(
        &self,
        id: &RecordId,
        report_type: Option<String>,
        month: Option<u32>,
        year: Option<i32>,
        data: Option<serde_json::Value>,
        remarks: Option<String>,
    ) -> RepoResult<Report> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    reportType = $report_type OR reportType,
                    month = IF $has_month THEN $month ELSE month END,
                    year = IF $has_year THEN $year ELSE year END,
                    data = IF $has_data THEN $data ELSE data END,
                    remarks = $remarks OR remarks,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("thing", id.clone()))
            .bind(("report_type", report_type))
            .bind(("has_month", month.is_some()))
            .bind(("month", month))
            .bind(("has_year", year.is_some()))
            .bind(("year", year))
            .bind(("has_data", data.is_some()))
            .bind(("data", data))
            .bind(("remarks", remarks))
            .bind(("now", time::now_millis()))
            .await?;

        result
            .take::<Option<Report>>(0)?
            .ok_or_else(|| RepoError::NotFound("Report not found".to_string()))
    }

    /// Permanent delete
    pub async fn delete(&self, id: &RecordId) -> RepoResult<Report> {
        let mut result = self
            .base
            .db()
            .query("DELETE $thing RETURN BEFORE")
            .bind(("thing", id.clone()))
            .await?;
        let deleted: Vec<Report> = result.take(0)?;
        deleted
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound("Report not found".to_string()))
    }
}
