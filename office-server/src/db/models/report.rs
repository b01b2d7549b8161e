//! Report Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::client::ClientId;
use super::employee::EmployeeId;
use super::user::UserId;
use super::{serde_helpers, RecordStatus};

/// Generated report matching SurrealDB schema
///
/// `data` 为自由形状的 JSON，内容由报表类型决定。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub report_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
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
    pub employee: Option<EmployeeId>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub client: Option<ClientId>,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(with = "serde_helpers::record_id")]
    pub generated_by: UserId,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Generate report payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCreate {
    pub report_type: Option<String>,
    pub month: Option<i64>,
    pub year: Option<i64>,
    pub project: Option<String>,
    pub employee: Option<String>,
    pub client: Option<String>,
    pub data: Option<serde_json::Value>,
    pub remarks: Option<String>,
}

/// Update report payload (admin)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportUpdate {
    pub report_type: Option<String>,
    pub month: Option<i64>,
    pub year: Option<i64>,
    pub data: Option<serde_json::Value>,
    pub remarks: Option<String>,
}
