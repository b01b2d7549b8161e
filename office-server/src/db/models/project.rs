//! Project Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::client::ClientId;
use super::employee::EmployeeId;
use super::serde_helpers;
use super::user::UserId;

/// 项目优先级
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// 项目状态 (inactive 表示软删除)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    OnHold,
    Cancelled,
    Inactive,
}

/// Project matching SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub client: Option<ClientId>,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub team: Vec<EmployeeId>,
    /// Unix millis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<i64>,
    #[serde(default)]
    pub priority: ProjectPriority,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub created_by: Option<UserId>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub assigned_by: Option<UserId>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create project payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub client: Option<String>,
    pub team: Option<Vec<String>>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub priority: Option<String>,
    pub budget: Option<f64>,
}

/// Update project payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub client: Option<String>,
    pub team: Option<Vec<String>>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub priority: Option<String>,
    pub budget: Option<f64>,
    pub status: Option<String>,
}

/// `GET /projects/stats` 的看板计数 (不含 inactive)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    #[serde(default)]
    pub total_projects: usize,
    #[serde(default)]
    pub active: usize,
    #[serde(default)]
    pub completed: usize,
    #[serde(default)]
    pub urgent: usize,
}
