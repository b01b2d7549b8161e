//! Notification Repository
//!
//! archived 即软删除：缺省列表与收件箱都排除；批量操作
//! 覆盖全部命中 ID，无部分失败形态。

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, page_window};
use crate::db::models::{
    Delivery, DeliveryChannel, Notification, NotificationStatus, NotificationType,
    RecipientContact, RecipientRef, UserId,
};
use crate::utils::time;

/// `GET /notifications/all` 查询过滤条件
#[derive(Debug, Default)]
pub struct NotificationFilter {
    pub notification_type: Option<NotificationType>,
    pub status: Option<NotificationStatus>,
    pub q: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// 单条通知的创建字段，联系方式已在 service 层解析快照
#[derive(Debug, Clone)]
pub struct NotificationWrite {
    pub notification_type: NotificationType,
    pub message: String,
    pub recipient: RecipientRef,
    pub recipient_contact: RecipientContact,
    pub channels: Vec<DeliveryChannel>,
    pub deliveries: Vec<Delivery>,
    pub remarks: Option<String>,
}

#[derive(Clone)]
pub struct NotificationRepository {
    base: BaseRepository,
}

impl NotificationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find notification by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Notification>> {
        let notification: Option<Notification> = self.base.db().select(id.clone()).await?;
        Ok(notification)
    }

    /// Create one notification with pending per-channel deliveries
    pub async fn create(
        &self,
        write: NotificationWrite,
        created_by: UserId,
    ) -> RepoResult<Notification> {
        let now = time::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE notification SET
                    notificationType = $notification_type,
                    message = $message,
                    recipient = $recipient,
                    recipientContact = $recipient_contact,
                    channels = $channels,
                    deliveries = $deliveries,
                    status = 'unread',
                    createdBy = $created_by,
                    sentBy = $created_by,
                    remarks = $remarks,
                    createdAt = $now,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("notification_type", write.notification_type))
            .bind(("message", write.message))
            .bind(("recipient", write.recipient))
            .bind(("recipient_contact", write.recipient_contact))
            .bind(("channels", write.channels))
            .bind(("deliveries", write.deliveries))
            .bind(("created_by", created_by))
            .bind(("remarks", write.remarks))
            .bind(("now", now))
            .await?;

        result
            .take::<Option<Notification>>(0)?
            .ok_or_else(|| RepoError::Database("Failed to create notification".to_string()))
    }

    /// Admin view across all recipients; archived excluded unless asked for
    pub async fn list_all(
        &self,
        filter: NotificationFilter,
    ) -> RepoResult<(Vec<Notification>, usize)> {
        let (_, limit, start) = page_window(filter.page, filter.limit, 20);

        let mut clauses: Vec<&str> = Vec::new();
        if filter.status.is_some() {
            clauses.push("status = $status");
        } else {
            clauses.push("status != 'archived'");
        }
        if filter.notification_type.is_some() {
            clauses.push("notificationType = $notification_type");
        }
        if filter.q.is_some() {
            clauses.push("string::lowercase(message) CONTAINS $q");
        }
        let where_clause = format!(" WHERE {}", clauses.join(" AND "));

        let sql = format!(
            "SELECT count() AS total FROM notification{where_clause} GROUP ALL; \
             SELECT * FROM notification{where_clause} \
             ORDER BY createdAt DESC LIMIT {limit} START {start}"
        );

        let mut qb = self.base.db().query(sql);
        if let Some(status) = filter.status {
            qb = qb.bind(("status", status));
        }
        if let Some(notification_type) = filter.notification_type {
            qb = qb.bind(("notification_type", notification_type));
        }
        if let Some(q) = filter.q {
            qb = qb.bind(("q", q.to_lowercase()));
        }

        let mut result = qb.await?;
        let total = result
            .take::<Option<CountRow>>(0)?
            .map(|c| c.total)
            .unwrap_or(0);
        let notifications: Vec<Notification> = result.take(1)?;
        Ok((notifications, total))
    }

    /// 收件箱：recipient.id 命中调用者任一身份 (user/employee/client)
    pub async fn list_for_recipients(
        &self,
        recipient_ids: Vec<String>,
        page: Option<usize>,
        limit: Option<usize>,
    ) -> RepoResult<(Vec<Notification>, usize)> {
        let (_, limit, start) = page_window(page, limit, 20);
        let sql = format!(
            "SELECT count() AS total FROM notification \
             WHERE recipient.id INSIDE $ids AND status != 'archived' GROUP ALL; \
             SELECT * FROM notification \
             WHERE recipient.id INSIDE $ids AND status != 'archived' \
             ORDER BY createdAt DESC LIMIT {limit} START {start}"
        );
        let mut result = self
            .base
            .db()
            .query(sql)
            .bind(("ids", recipient_ids))
            .await?;
        let total = result
            .take::<Option<CountRow>>(0)?
            .map(|c| c.total)
            .unwrap_or(0);
        let notifications: Vec<Notification> = result.take(1)?;
        Ok((notifications, total))
    }

    /// 批量置已读；重复调用幂等
    pub async fn mark_read(&self, ids: Vec<RecordId>) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE notification SET status = 'read', updatedAt = $now \
                 WHERE id INSIDE $ids AND status != 'archived'",
            )
            .bind(("ids", ids))
            .bind(("now", time::now_millis()))
            .await?
            .check()?;
        Ok(())
    }

    /// 批量归档 (软删除)
    pub async fn archive(&self, ids: Vec<RecordId>) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE notification SET status = 'archived', updatedAt = $now \
                 WHERE id INSIDE $ids",
            )
            .bind(("ids", ids))
            .bind(("now", time::now_millis()))
            .await?
            .check()?;
        Ok(())
    }

    /// worker 回写通道投递结果
    pub async fn set_deliveries(
        &self,
        id: &RecordId,
        deliveries: Vec<Delivery>,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $thing SET deliveries = $deliveries, updatedAt = $now")
            .bind(("thing", id.clone()))
            .bind(("deliveries", deliveries))
            .bind(("now", time::now_millis()))
            .await?
            .check()?;
        Ok(())
    }
}
