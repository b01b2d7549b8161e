//! Notification Model
//!
//! 收件人是跨表多态引用，联系方式在创建时快照到通知本身，
//! 之后修改收件人资料不影响已创建的通知投递。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::user::UserId;
use super::serde_helpers;

/// 通知类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    #[default]
    Info,
    Alert,
    Reminder,
    System,
}

/// 阅读状态 (archived 表示软删除)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    #[default]
    Unread,
    Read,
    Archived,
}

/// 投递通道
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryChannel {
    #[default]
    InApp,
    Email,
    Sms,
}

/// 单通道投递结果
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    #[default]
    Pending,
    Delivered,
    Failed,
}

/// 通道投递记录，失败记录在案、不重试
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub channel: DeliveryChannel,
    #[serde(default)]
    pub status: DeliveryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Delivery {
    pub fn pending(channel: DeliveryChannel) -> Self {
        Self {
            channel,
            status: DeliveryStatus::Pending,
            delivered_at: None,
            error: None,
        }
    }
}

/// 收件人引用：`{ "model": "User" | "Employee" | "Client", "id": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "model")]
pub enum RecipientRef {
    User { id: String },
    Employee { id: String },
    Client { id: String },
}

impl RecipientRef {
    pub fn target_id(&self) -> &str {
        match self {
            RecipientRef::User { id }
            | RecipientRef::Employee { id }
            | RecipientRef::Client { id } => id,
        }
    }
}

/// 创建时快照的联系方式
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecipientContact {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Notification matching SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub notification_type: NotificationType,
    pub message: String,
    pub recipient: RecipientRef,
    #[serde(default)]
    pub recipient_contact: RecipientContact,
    #[serde(default = "default_channels")]
    pub channels: Vec<DeliveryChannel>,
    #[serde(default)]
    pub deliveries: Vec<Delivery>,
    #[serde(default)]
    pub status: NotificationStatus,
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
    pub sent_by: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_channels() -> Vec<DeliveryChannel> {
    vec![DeliveryChannel::InApp]
}

/// 创建请求里的收件人项，判别符在 handler 校验闭集后转为 [`RecipientRef`]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientInput {
    pub id: Option<String>,
    pub model: Option<String>,
}

/// Create notification payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCreate {
    pub notification_type: Option<String>,
    pub message: Option<String>,
    pub recipients: Option<Vec<RecipientInput>>,
    pub channels: Option<Vec<String>>,
    pub remarks: Option<String>,
}

/// 批量已读/归档请求体
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationIds {
    pub ids: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_wire_shape() {
        let recipient = RecipientRef::Employee {
            id: "employee:e1".to_string(),
        };
        let json = serde_json::to_value(&recipient).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "Employee", "id": "employee:e1"})
        );
        let back: RecipientRef = serde_json::from_value(json).unwrap();
        assert_eq!(back, recipient);
    }

    #[test]
    fn test_unknown_recipient_model_rejected() {
        let bad = serde_json::json!({"model": "Vendor", "id": "vendor:v1"});
        assert!(serde_json::from_value::<RecipientRef>(bad).is_err());
    }
}
