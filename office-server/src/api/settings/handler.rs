//! Settings API Handlers
//!
//! 三个 PATCH 入口共用同一载荷形状，邮件/安全入口只落各自子集。

use axum::{Extension, Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Setting, SettingUpdate};
use crate::db::repository::parse_record_id;
use crate::utils::error::ok;
use crate::utils::{AppResponse, AppResult};

/// `GET /settings` - 单例，首次读取时创建
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Setting>>> {
    let settings = state.settings().get_or_create().await?;
    Ok(ok(settings, "Settings fetched"))
}

/// `PATCH /settings` - 通用配置
pub async fn update(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<SettingUpdate>,
) -> AppResult<Json<AppResponse<Setting>>> {
    let updated_by = parse_record_id(&current.id)?;
    let settings = state.settings().update(payload, updated_by).await?;
    Ok(ok(settings, "Core Registry Synced"))
}

/// `PATCH /settings/email` - 只落邮件通道相关字段
pub async fn update_email(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<SettingUpdate>,
) -> AppResult<Json<AppResponse<Setting>>> {
    let patch = SettingUpdate {
        smtp_host: payload.smtp_host,
        smtp_port: payload.smtp_port,
        smtp_user: payload.smtp_user,
        smtp_from_email: payload.smtp_from_email,
        email_enabled: payload.email_enabled,
        ..SettingUpdate::default()
    };
    let updated_by = parse_record_id(&current.id)?;
    let settings = state.settings().update(patch, updated_by).await?;
    Ok(ok(settings, "Mail Engine Protocol Synchronized"))
}

/// `PATCH /settings/security` - 只落安全相关字段
pub async fn update_security(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<SettingUpdate>,
) -> AppResult<Json<AppResponse<Setting>>> {
    let patch = SettingUpdate {
        password_min_length: payload.password_min_length,
        session_timeout: payload.session_timeout,
        enable_two_factor: payload.enable_two_factor,
        ..SettingUpdate::default()
    };
    let updated_by = parse_record_id(&current.id)?;
    let settings = state.settings().update(patch, updated_by).await?;
    Ok(ok(settings, "Security Protocols Hardened"))
}
