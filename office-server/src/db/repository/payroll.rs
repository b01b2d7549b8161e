//! Payroll Repository
//!
//! (employee, month, year) 唯一索引兜底并发生成；calculations
//! 由调用方以 [`SalaryInput::calculate`] 重算后传入，这里只负责落盘。
//!
//! [`SalaryInput::calculate`]: crate::db::models::SalaryInput::calculate

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, page_window};
use crate::db::models::{
    AttendanceSnapshot, EmployeeId, PaymentStatus, Payroll, PayrollStats, SalaryCalculations,
    SalaryInput, UserId,
};
use crate::utils::time;

/// `GET /payroll` 查询过滤条件
#[derive(Debug, Default)]
pub struct PayrollFilter {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub employee: Option<EmployeeId>,
    pub payment_status: Option<PaymentStatus>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// 工资列表结果：当页数据、过滤总数、完整过滤集上的看板统计
#[derive(Debug)]
pub struct PayrollPage {
    pub items: Vec<Payroll>,
    pub total: usize,
    pub stats: PayrollStats,
}

#[derive(Clone)]
pub struct PayrollRepository {
    base: BaseRepository,
}

impl PayrollRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find payroll by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Payroll>> {
        let payroll: Option<Payroll> = self.base.db().select(id.clone()).await?;
        Ok(payroll)
    }

    /// 同期的非软删记录是否已存在
    pub async fn exists_for_period(
        &self,
        employee: &EmployeeId,
        month: u32,
        year: i32,
    ) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT count() AS total FROM payroll \
                 WHERE employee = $employee AND month = $month AND year = $year \
                 AND status = 'active' GROUP ALL",
            )
            .bind(("employee", employee.clone()))
            .bind(("month", month))
            .bind(("year", year))
            .await?;
        let total = result
            .take::<Option<CountRow>>(0)?
            .map(|c| c.total)
            .unwrap_or(0);
        Ok(total > 0)
    }

    /// Create a payroll record for a period.
    ///
    /// 唯一索引碰撞以 Duplicate 冒泡，调用方翻译为同一条 409 文案。
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        employee: EmployeeId,
        month: u32,
        year: i32,
        salary: SalaryInput,
        calculations: SalaryCalculations,
        attendance: AttendanceSnapshot,
        generated_by: UserId,
        remarks: Option<String>,
    ) -> RepoResult<Payroll> {
        let now = time::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE payroll SET
                    employee = $employee,
                    month = $month,
                    year = $year,
                    salary = $salary,
                    calculations = $calculations,
                    attendance = $attendance,
                    paymentStatus = 'pending',
                    generatedBy = $generated_by,
                    remarks = $remarks,
                    status = 'active',
                    createdAt = $now,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("employee", employee))
            .bind(("month", month))
            .bind(("year", year))
            .bind(("salary", salary))
            .bind(("calculations", calculations))
            .bind(("attendance", attendance))
            .bind(("generated_by", generated_by))
            .bind(("remarks", remarks))
            .bind(("now", now))
            .await?;

        result
            .take::<Option<Payroll>>(0)?
            .ok_or_else(|| RepoError::Database("Failed to create payroll".to_string()))
    }

    /// List payrolls with filters plus dashboard stats over the full
    /// filtered set, all in one round trip.
    pub async fn list(&self, filter: PayrollFilter) -> RepoResult<PayrollPage> {
        let (_, limit, start) = page_window(filter.page, filter.limit, 10);

        let mut clauses: Vec<&str> = vec!["status = 'active'"];
        if filter.month.is_some() {
            clauses.push("month = $month");
        }
        if filter.year.is_some() {
            clauses.push("year = $year");
        }
        if filter.employee.is_some() {
            clauses.push("employee = $employee");
        }
        if filter.payment_status.is_some() {
            clauses.push("paymentStatus = $payment_status");
        }
        let where_clause = format!(" WHERE {}", clauses.join(" AND "));

        let sql = format!(
            "SELECT count() AS total FROM payroll{where_clause} GROUP ALL; \
             SELECT math::sum(calculations.netSalary) AS totalNet, \
                    count(paymentStatus = 'paid') AS paidCount, \
                    count(paymentStatus = 'pending') AS pendingCount \
             FROM payroll{where_clause} GROUP ALL; \
             SELECT * FROM payroll{where_clause} \
             ORDER BY year DESC, month DESC LIMIT {limit} START {start}"
        );

        let mut qb = self.base.db().query(sql);
        if let Some(month) = filter.month {
            qb = qb.bind(("month", month));
        }
        if let Some(year) = filter.year {
            qb = qb.bind(("year", year));
        }
        if let Some(employee) = filter.employee {
            qb = qb.bind(("employee", employee));
        }
        if let Some(payment_status) = filter.payment_status {
            qb = qb.bind(("payment_status", payment_status));
        }

        let mut result = qb.await?;
        let total = result
            .take::<Option<CountRow>>(0)?
            .map(|c| c.total)
            .unwrap_or(0);
        let stats = result
            .take::<Option<PayrollStats>>(1)?
            .unwrap_or_default();
        let items: Vec<Payroll> = result.take(2)?;
        Ok(PayrollPage {
            items,
            total,
            stats,
        })
    }

    /// `GET /payroll/me`：单员工的全部有效工资单，年月倒序
    pub async fn list_for_employee(&self, employee: &EmployeeId) -> RepoResult<Vec<Payroll>> {
        let payrolls: Vec<Payroll> = self
            .base
            .db()
            .query(
                "SELECT * FROM payroll WHERE employee = $employee AND status = 'active' \
                 ORDER BY year DESC, month DESC",
            )
            .bind(("employee", employee.clone()))
            .await?
            .take(0)?;
        Ok(payrolls)
    }

    /// Overwrite salary inputs and recomputed amounts
    pub async fn update(
        &self,
        id: &RecordId,
        salary: SalaryInput,
        calculations: SalaryCalculations,
        remarks: Option<String>,
        payment_status: Option<PaymentStatus>,
    ) -> RepoResult<Payroll> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    salary = $salary,
                    calculations = $calculations,
                    remarks = $remarks OR remarks,
                    paymentStatus = IF $has_payment_status THEN $payment_status ELSE paymentStatus END,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("thing", id.clone()))
            .bind(("salary", salary))
            .bind(("calculations", calculations))
            .bind(("remarks", remarks))
            .bind(("has_payment_status", payment_status.is_some()))
            .bind(("payment_status", payment_status))
            .bind(("now", time::now_millis()))
            .await?;

        result
            .take::<Option<Payroll>>(0)?
            .ok_or_else(|| RepoError::NotFound("Payroll not found".to_string()))
    }

    /// `PATCH /payroll/{id}/pay`：显式标记已发放
    pub async fn mark_paid(&self, id: &RecordId) -> RepoResult<Payroll> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET paymentStatus = 'paid', updatedAt = $now RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("now", time::now_millis()))
            .await?;
        result
            .take::<Option<Payroll>>(0)?
            .ok_or_else(|| RepoError::NotFound("Payroll not found".to_string()))
    }

    /// Soft delete (status → inactive)
    pub async fn soft_delete(&self, id: &RecordId) -> RepoResult<Payroll> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = 'inactive', updatedAt = $now RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("now", time::now_millis()))
            .await?;
        result
            .take::<Option<Payroll>>(0)?
            .ok_or_else(|| RepoError::NotFound("Payroll not found".to_string()))
    }
}
