//! Activity Audit Log Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::user::UserId;
use super::{serde_helpers, RecordStatus};

/// 审计动作
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityAction {
    Create,
    Update,
    Delete,
    Login,
    Logout,
    Assign,
    Approve,
}

/// Append-only audit entry matching SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub action: ActivityAction,
    /// 业务模块名，取自请求路径段
    pub module: String,
    pub description: String,
    #[serde(with = "serde_helpers::record_id")]
    pub performed_by: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(default)]
    pub created_at: i64,
}
