//! Asset Model
//!
//! 资产可被指派给员工、项目或房间三类目标之一，指派目标用
//! 带判别符的 tagged union 表达，写入时即校验判别符闭集。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use super::user::UserId;

/// 资产类别
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Hardware,
    Software,
    Furniture,
    License,
}

/// 资产生命周期状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    #[default]
    Available,
    Assigned,
    Maintenance,
    Retired,
}

/// 指派目标：`{ "model": "Employee" | "Project" | "Room", "id": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "model")]
pub enum AssetAssignee {
    Employee { id: String },
    Project { id: String },
    Room { id: String },
}

impl AssetAssignee {
    pub fn target_id(&self) -> &str {
        match self {
            AssetAssignee::Employee { id }
            | AssetAssignee::Project { id }
            | AssetAssignee::Room { id } => id,
        }
    }
}

/// Asset matching SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub category: AssetCategory,
    pub serial_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_expiry: Option<i64>,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub status: AssetStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<AssetAssignee>,
    /// 存放位置，指向 room
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub location: Option<RecordId>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub created_by: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create asset payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCreate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<i64>,
    pub warranty_expiry: Option<i64>,
    pub cost: Option<f64>,
    pub location: Option<String>,
    pub remarks: Option<String>,
}

/// Update asset payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub purchase_date: Option<i64>,
    pub warranty_expiry: Option<i64>,
    pub cost: Option<f64>,
    pub remarks: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
}

/// Assign asset payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAssign {
    pub assigned_to: Option<String>,
    pub assigned_to_model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignee_wire_shape() {
        let assignee = AssetAssignee::Employee {
            id: "employee:e1".to_string(),
        };
        let json = serde_json::to_value(&assignee).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "Employee", "id": "employee:e1"})
        );
    }

    #[test]
    fn test_unknown_discriminator_rejected() {
        let bad = serde_json::json!({"model": "Vehicle", "id": "vehicle:v1"});
        assert!(serde_json::from_value::<AssetAssignee>(bad).is_err());
    }
}
