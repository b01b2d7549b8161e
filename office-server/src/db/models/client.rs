//! Client Account Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::user::UserRole;
use super::{serde_helpers, RecordStatus};

/// Client ID type
pub type ClientId = RecordId;

/// Client account matching SurrealDB schema
///
/// 客户与 user 账户以 email 关联 (收件箱匹配)，删除为永久删除
/// 并级联清理外部存储的图片。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<ClientId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create client payload (admin)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCreate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub avatar: Option<String>,
    pub cover_image: Option<String>,
}

/// Admin update payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
    pub is_verified: Option<bool>,
}

/// Self-service profile update (`PATCH /clients/me`)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfileUpdate {
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
