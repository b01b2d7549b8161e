//! Finance Transaction Repository
//!
//! 列表与完整过滤集上的收支汇总在同一次往返完成。

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, page_window, parse_record_id};
use crate::db::models::{
    ClientId, EmployeeId, FinanceSummary, FinanceTransaction, RecordStatus, TransactionType,
    UserId,
};
use crate::utils::{money, time};

/// `GET /finance` 查询过滤条件
#[derive(Debug, Default)]
pub struct FinanceFilter {
    pub transaction_type: Option<TransactionType>,
    pub project: Option<RecordId>,
    pub client: Option<ClientId>,
    pub employee: Option<EmployeeId>,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// 创建时由 handler 校验后组装的字段集合
#[derive(Debug, Clone)]
pub struct FinanceWrite {
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub description: String,
    pub project: Option<RecordId>,
    pub client: Option<ClientId>,
    pub employee: Option<EmployeeId>,
    pub transaction_date: i64,
    pub remarks: Option<String>,
}

/// 财务分页结果：当页数据、过滤总数、完整过滤集上的汇总
#[derive(Debug)]
pub struct FinancePage {
    pub items: Vec<FinanceTransaction>,
    pub total: usize,
    pub summary: FinanceSummary,
}

/// 汇总行的中间形状，netBalance 在内存中以 decimal 收口
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryRow {
    #[serde(default)]
    total_income: f64,
    #[serde(default)]
    total_expense: f64,
}

#[derive(Clone)]
pub struct FinanceRepository {
    base: BaseRepository,
}

impl FinanceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find transaction by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<FinanceTransaction>> {
        let thing = parse_record_id(id)?;
        let tx: Option<FinanceTransaction> = self.base.db().select(thing).await?;
        Ok(tx)
    }

    /// Create a transaction
    pub async fn create(
        &self,
        write: FinanceWrite,
        created_by: UserId,
    ) -> RepoResult<FinanceTransaction> {
        let now = time::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE finance SET
                    transactionType = $transaction_type,
                    amount = $amount,
                    description = $description,
                    project = $project,
                    client = $client,
                    employee = $employee,
                    transactionDate = $transaction_date,
                    status = 'active',
                    createdBy = $created_by,
                    remarks = $remarks,
                    createdAt = $now,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("transaction_type", write.transaction_type))
            .bind(("amount", write.amount))
            .bind(("description", write.description))
            .bind(("project", write.project))
            .bind(("client", write.client))
            .bind(("employee", write.employee))
            .bind(("transaction_date", write.transaction_date))
            .bind(("created_by", created_by))
            .bind(("remarks", write.remarks))
            .bind(("now", now))
            .await?;

        result
            .take::<Option<FinanceTransaction>>(0)?
            .ok_or_else(|| RepoError::Database("Failed to create transaction".to_string()))
    }

    /// List transactions with the income/expense summary over the full
    /// filtered set in the same round trip.
    pub async fn list(&self, filter: FinanceFilter) -> RepoResult<FinancePage> {
        let (_, limit, start) = page_window(filter.page, filter.limit, 10);

        let mut clauses: Vec<&str> = vec!["status = 'active'"];
        if filter.transaction_type.is_some() {
            clauses.push("transactionType = $transaction_type");
        }
        if filter.project.is_some() {
            clauses.push("project = $project");
        }
        if filter.client.is_some() {
            clauses.push("client = $client");
        }
        if filter.employee.is_some() {
            clauses.push("employee = $employee");
        }
        if filter.from.is_some() {
            clauses.push("transactionDate >= $from");
        }
        if filter.to.is_some() {
            clauses.push("transactionDate < $to");
        }
        let where_clause = format!(" WHERE {}", clauses.join(" AND "));

        let sql = format!(
            "SELECT count() AS total FROM finance{where_clause} GROUP ALL; \
             SELECT math::sum(IF transactionType = 'income' THEN amount ELSE 0 END) AS totalIncome, \
                    math::sum(IF transactionType = 'expense' THEN amount ELSE 0 END) AS totalExpense \
             FROM finance{where_clause} GROUP ALL; \
             SELECT * FROM finance{where_clause} \
             ORDER BY transactionDate DESC LIMIT {limit} START {start}"
        );

        let mut qb = self.base.db().query(sql);
        if let Some(transaction_type) = filter.transaction_type {
            qb = qb.bind(("transaction_type", transaction_type));
        }
        if let Some(project) = filter.project {
            qb = qb.bind(("project", project));
        }
        if let Some(client) = filter.client {
            qb = qb.bind(("client", client));
        }
        if let Some(employee) = filter.employee {
            qb = qb.bind(("employee", employee));
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
        let row = result.take::<Option<SummaryRow>>(1)?.unwrap_or_default();
        let items: Vec<FinanceTransaction> = result.take(2)?;

        let net_balance = money::to_f64(
            money::to_decimal(row.total_income) - money::to_decimal(row.total_expense),
        );
        Ok(FinancePage {
            items,
            total,
            summary: FinanceSummary {
                total_income: row.total_income,
                total_expense: row.total_expense,
                net_balance,
            },
        })
    }

    /// Update the mutable transaction fields
    pub async fn update(
        &self,
        id: &RecordId,
        amount: Option<f64>,
        description: Option<String>,
        status: Option<RecordStatus>,
        remarks: Option<String>,
    ) -> RepoResult<FinanceTransaction> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    amount = IF $has_amount THEN $amount ELSE amount END,
                    description = $description OR description,
                    status = IF $has_status THEN $status ELSE status END,
                    remarks = $remarks OR remarks,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("thing", id.clone()))
            .bind(("has_amount", amount.is_some()))
            .bind(("amount", amount))
            .bind(("description", description))
            .bind(("has_status", status.is_some()))
            .bind(("status", status))
            .bind(("remarks", remarks))
            .bind(("now", time::now_millis()))
            .await?;

        result
            .take::<Option<FinanceTransaction>>(0)?
            .ok_or_else(|| RepoError::NotFound("Transaction not found".to_string()))
    }

    /// Soft delete (status → inactive)
    pub async fn soft_delete(&self, id: &RecordId) -> RepoResult<FinanceTransaction> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = 'inactive', updatedAt = $now RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("now", time::now_millis()))
            .await?;
        result
            .take::<Option<FinanceTransaction>>(0)?
            .ok_or_else(|| RepoError::NotFound("Transaction not found".to_string()))
    }
}
