//! 通知投递后台 worker
//!
//! 逐通道尝试投递并把结果回写到通知记录上：delivered 带时间戳，
//! failed 带错误文案。不重试，请求侧只能通过存储状态观察结果。

use tokio::sync::mpsc;

use super::mailer;
use crate::db::models::{Delivery, DeliveryChannel, DeliveryStatus, Notification};
use crate::db::repository::NotificationRepository;
use crate::utils::time;

/// 消费投递队列的 worker
pub struct DeliveryWorker {
    repository: NotificationRepository,
}

impl DeliveryWorker {
    pub fn new(repository: NotificationRepository) -> Self {
        Self { repository }
    }

    /// 处理循环，通道关闭时退出
    pub async fn run(self, mut rx: mpsc::Receiver<Notification>) {
        tracing::info!("Delivery worker started");
        while let Some(notification) = rx.recv().await {
            self.deliver(notification).await;
        }
        tracing::info!("Delivery worker stopped");
    }

    async fn deliver(&self, notification: Notification) {
        let Some(id) = notification.id.clone() else {
            tracing::warn!("Notification without id handed to delivery worker");
            return;
        };

        let deliveries: Vec<Delivery> = notification
            .channels
            .iter()
            .map(|channel| attempt(*channel, &notification))
            .collect();

        if let Err(e) = self.repository.set_deliveries(&id, deliveries).await {
            tracing::warn!(notification = %id, error = %e, "Failed to record delivery outcomes");
        }
    }
}

/// 单通道投递：in-app 即落库本身，email/sms 走日志 seam
fn attempt(channel: DeliveryChannel, notification: &Notification) -> Delivery {
    match channel {
        DeliveryChannel::InApp => delivered(channel),
        DeliveryChannel::Email => match notification.recipient_contact.email.as_deref() {
            Some(email) if !email.is_empty() => {
                mailer::send_email(email, "New notification", &notification.message);
                delivered(channel)
            }
            _ => failed(channel, "No email address on record"),
        },
        DeliveryChannel::Sms => match notification.recipient_contact.phone.as_deref() {
            Some(phone) if !phone.is_empty() => {
                mailer::send_sms(phone, &notification.message);
                delivered(channel)
            }
            _ => failed(channel, "No phone number on record"),
        },
    }
}

fn delivered(channel: DeliveryChannel) -> Delivery {
    Delivery {
        channel,
        status: DeliveryStatus::Delivered,
        delivered_at: Some(time::now_millis()),
        error: None,
    }
}

fn failed(channel: DeliveryChannel, reason: &str) -> Delivery {
    Delivery {
        channel,
        status: DeliveryStatus::Failed,
        delivered_at: None,
        error: Some(reason.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{RecipientContact, RecipientRef};

    fn notification(email: Option<&str>, phone: Option<&str>) -> Notification {
        Notification {
            id: None,
            notification_type: Default::default(),
            message: "hello".to_string(),
            recipient: RecipientRef::User {
                id: "user:u1".to_string(),
            },
            recipient_contact: RecipientContact {
                email: email.map(|s| s.to_string()),
                phone: phone.map(|s| s.to_string()),
            },
            channels: vec![],
            deliveries: vec![],
            status: Default::default(),
            created_by: None,
            sent_by: None,
            remarks: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_in_app_always_delivers() {
        let outcome = attempt(DeliveryChannel::InApp, &notification(None, None));
        assert_eq!(outcome.status, DeliveryStatus::Delivered);
        assert!(outcome.delivered_at.is_some());
    }

    #[test]
    fn test_email_requires_contact() {
        let ok = attempt(
            DeliveryChannel::Email,
            &notification(Some("a@b.c"), None),
        );
        assert_eq!(ok.status, DeliveryStatus::Delivered);

        let missing = attempt(DeliveryChannel::Email, &notification(None, None));
        assert_eq!(missing.status, DeliveryStatus::Failed);
        assert_eq!(missing.error.as_deref(), Some("No email address on record"));

        let empty = attempt(DeliveryChannel::Email, &notification(Some(""), None));
        assert_eq!(empty.status, DeliveryStatus::Failed);
    }

    #[test]
    fn test_sms_requires_phone() {
        let ok = attempt(DeliveryChannel::Sms, &notification(None, Some("+100")));
        assert_eq!(ok.status, DeliveryStatus::Delivered);

        let missing = attempt(DeliveryChannel::Sms, &notification(None, None));
        assert_eq!(missing.status, DeliveryStatus::Failed);
    }
}
