//! Finance Transaction Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::client::ClientId;
use super::employee::EmployeeId;
use super::user::UserId;
use super::{serde_helpers, RecordStatus};

/// 收支类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

/// Finance transaction matching SurrealDB schema
///
/// 金额非负，可选关联项目/客户/员工，软删除走 status。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceTransaction {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub description: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub project: Option<RecordId>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub client: Option<ClientId>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub employee: Option<EmployeeId>,
    /// Unix millis，缺省为创建时刻
    pub transaction_date: i64,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(with = "serde_helpers::record_id")]
    pub created_by: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create transaction payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceCreate {
    pub transaction_type: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub project: Option<String>,
    pub client: Option<String>,
    pub employee: Option<String>,
    pub transaction_date: Option<i64>,
    pub remarks: Option<String>,
}

/// Update transaction payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceUpdate {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub remarks: Option<String>,
}

/// 列表接口单次往返里随分页一起返回的汇总
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    #[serde(default)]
    pub total_income: f64,
    #[serde(default)]
    pub total_expense: f64,
    #[serde(default)]
    pub net_balance: f64,
}
