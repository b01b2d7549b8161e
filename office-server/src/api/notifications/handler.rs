//! Notification API Handlers
//!
//! 群发对每个收件人各建一条记录；联系方式在创建时快照，
//! 找不到收件人档案时降级为空联系方式而不是整批失败。

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    Delivery, DeliveryChannel, Notification, NotificationCreate, NotificationIds,
    NotificationStatus, NotificationType, RecipientContact, RecipientRef, parse_enum,
};
use crate::db::repository::notification::{NotificationFilter, NotificationWrite};
use crate::db::repository::{page_window, parse_record_id};
use crate::utils::error::{created, ok, ok_message};
use crate::utils::{AppError, AppResponse, AppResult, Paged};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListQuery {
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    pub status: Option<String>,
    pub q: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// 收件人联系方式快照；档案缺失时返回空快照
async fn resolve_contact(state: &ServerState, recipient: &RecipientRef) -> RecipientContact {
    let lookup = async {
        match recipient {
            RecipientRef::User { id } => {
                let user = state.users().find_by_id(id).await?;
                Ok::<_, AppError>(user.map(|u| RecipientContact {
                    email: Some(u.email),
                    phone: u.phone,
                }))
            }
            RecipientRef::Employee { id } => {
                let Some(employee) = state.employees().find_by_id(id).await? else {
                    return Ok(None);
                };
                // 员工档案没有邮箱时退回关联账号的邮箱
                let email = if employee.email.trim().is_empty() {
                    state
                        .users()
                        .find_by_id(&employee.user.to_string())
                        .await?
                        .map(|u| u.email)
                } else {
                    Some(employee.email)
                };
                Ok(Some(RecipientContact {
                    email,
                    phone: employee.phone,
                }))
            }
            RecipientRef::Client { id } => {
                let client = state.clients().find_by_id(id).await?;
                Ok(client.map(|c| RecipientContact {
                    email: Some(c.email),
                    phone: c.phone,
                }))
            }
        }
    };

    match lookup.await {
        Ok(Some(contact)) => contact,
        Ok(None) => {
            tracing::warn!(recipient = recipient.target_id(), "Recipient profile not found, contact snapshot empty");
            RecipientContact::default()
        }
        Err(e) => {
            tracing::warn!(recipient = recipient.target_id(), error = %e, "Contact lookup failed, contact snapshot empty");
            RecipientContact::default()
        }
    }
}

/// Send a notification to one or more recipients
pub async fn create(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<NotificationCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<Vec<Notification>>>)> {
    let message = payload
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::validation("Message is required"))?;
    let recipients = payload
        .recipients
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::validation("At least one recipient is required"))?;
    let notification_type = payload
        .notification_type
        .as_deref()
        .map(|t| parse_enum::<NotificationType>(t, "notificationType"))
        .transpose()
        .map_err(AppError::validation)?
        .unwrap_or_default();
    let channels = payload
        .channels
        .map(|list| {
            list.iter()
                .map(|c| parse_enum::<DeliveryChannel>(c, "channel"))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
        .map_err(AppError::validation)?
        .unwrap_or_else(|| vec![DeliveryChannel::InApp]);
    let created_by = parse_record_id(&current.id)?;

    // 先把收件人闭集整体校验掉，部分合法不落任何一条
    let mut refs = Vec::with_capacity(recipients.len());
    for input in recipients {
        let id = input
            .id
            .filter(|i| !i.trim().is_empty())
            .ok_or_else(|| AppError::validation("Recipient id is required"))?;
        let model = input
            .model
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| AppError::validation("Recipient model is required"))?;
        let recipient = match model.as_str() {
            "User" => RecipientRef::User { id },
            "Employee" => RecipientRef::Employee { id },
            "Client" => RecipientRef::Client { id },
            other => {
                return Err(AppError::validation(format!(
                    "Invalid recipient model: {}",
                    other
                )));
            }
        };
        refs.push(recipient);
    }

    let mut notifications = Vec::with_capacity(refs.len());
    for recipient in refs {
        let recipient_contact = resolve_contact(&state, &recipient).await;
        let deliveries = channels.iter().copied().map(Delivery::pending).collect();
        let notification = state
            .notifications()
            .create(
                NotificationWrite {
                    notification_type,
                    message: message.clone(),
                    recipient,
                    recipient_contact,
                    channels: channels.clone(),
                    deliveries,
                    remarks: payload.remarks.clone(),
                },
                created_by.clone(),
            )
            .await?;
        state.notify_service.enqueue(notification.clone());
        notifications.push(notification);
    }

    Ok(created(notifications, "Notification sent"))
}

/// Admin view across all recipients
pub async fn list_all(
    State(state): State<ServerState>,
    Query(query): Query<NotificationListQuery>,
) -> AppResult<Json<AppResponse<Paged<Notification>>>> {
    let notification_type = query
        .notification_type
        .as_deref()
        .map(|t| parse_enum::<NotificationType>(t, "type"))
        .transpose()
        .map_err(AppError::validation)?;
    let status = query
        .status
        .as_deref()
        .map(|s| parse_enum::<NotificationStatus>(s, "status"))
        .transpose()
        .map_err(AppError::validation)?;

    let (page, limit, _) = page_window(query.page, query.limit, 20);
    let (notifications, total) = state
        .notifications()
        .list_all(NotificationFilter {
            notification_type,
            status,
            q: query.q,
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok(ok(
        Paged::new(notifications, total, page, limit),
        "Notifications fetched",
    ))
}

/// `GET /notifications/me` - 命中调用者任一身份的收件箱
pub async fn my_notifications(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<NotificationListQuery>,
) -> AppResult<Json<AppResponse<Paged<Notification>>>> {
    let mut recipient_ids = vec![current.id.clone()];
    let user = parse_record_id(&current.id)?;
    if let Some(employee) = state.employees().find_by_user(&user).await?
        && let Some(id) = employee.id
    {
        recipient_ids.push(id.to_string());
    }
    if let Some(account) = state.users().find_by_id(&current.id).await?
        && let Some(client) = state.clients().find_by_email(&account.email).await?
        && let Some(id) = client.id
    {
        recipient_ids.push(id.to_string());
    }

    let (page, limit, _) = page_window(query.page, query.limit, 20);
    let (notifications, total) = state
        .notifications()
        .list_for_recipients(recipient_ids, query.page, query.limit)
        .await?;

    Ok(ok(
        Paged::new(notifications, total, page, limit),
        "Notifications fetched",
    ))
}

fn parse_ids(payload: NotificationIds) -> AppResult<Vec<surrealdb::RecordId>> {
    let ids = payload
        .ids
        .filter(|ids| !ids.is_empty())
        .ok_or_else(|| AppError::validation("No IDs provided"))?;
    ids.iter()
        .map(|id| parse_record_id(id).map_err(AppError::from))
        .collect()
}

/// `PATCH /notifications/read` - 批量已读，幂等
pub async fn mark_read_bulk(
    State(state): State<ServerState>,
    Json(payload): Json<NotificationIds>,
) -> AppResult<Json<AppResponse<()>>> {
    let ids = parse_ids(payload)?;
    state.notifications().mark_read(ids).await?;
    Ok(ok_message("Notifications marked as read"))
}

/// `PATCH /notifications/{id}/read`
pub async fn mark_read_one(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let thing = parse_record_id(&id)?;
    state.notifications().mark_read(vec![thing]).await?;
    Ok(ok_message("Notification marked as read"))
}

/// `DELETE /notifications` - 批量归档
pub async fn archive_bulk(
    State(state): State<ServerState>,
    Json(payload): Json<NotificationIds>,
) -> AppResult<Json<AppResponse<()>>> {
    let ids = parse_ids(payload)?;
    state.notifications().archive(ids).await?;
    Ok(ok_message("Notifications archived"))
}

/// `DELETE /notifications/{id}`
pub async fn archive_one(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let thing = parse_record_id(&id)?;
    state.notifications().archive(vec![thing]).await?;
    Ok(ok_message("Notification archived"))
}
