//! Authentication Handlers
//!
//! 注册、登录、刷新令牌、找回口令与登出。登录失败统一文案并
//! 带固定延迟，避免时序探测与邮箱枚举。

use std::time::Duration;

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::auth::{
    CurrentUser, TokenType, generate_otp, hash_password, sha256_hex, verify_password,
};
use crate::core::ServerState;
use crate::db::models::{
    ActivityAction, User, UserCreate, UserRole, UserStatus, parse_enum,
};
use crate::db::repository::activity::ActivityWrite;
use crate::db::repository::parse_record_id;
use crate::notify::mailer;
use crate::security_log;
use crate::utils::error::{created, ok, ok_message};
use crate::utils::time;
use crate::utils::{AppError, AppResponse, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// 验证/重置 OTP 的有效期
const OTP_TTL_MS: i64 = 60 * 60 * 1000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub otp: Option<String>,
    pub new_password: Option<String>,
}

/// 登录响应载荷
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
}

fn user_id_string(user: &User) -> AppResult<String> {
    user.id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("User record has no id"))
}

/// Register a new account
///
/// 账户以 pending 状态创建，验证 OTP 经邮件 seam 发出。
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<User>>)> {
    let has = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.trim().is_empty());
    if !has(&payload.name) || !has(&payload.email) || !has(&payload.password) || !has(&payload.role)
    {
        return Err(AppError::validation("All fields are required"));
    }

    let role: UserRole = parse_enum(payload.role.as_deref().unwrap_or_default(), "role")
        .map_err(AppError::validation)?;
    let password = payload.password.clone().unwrap_or_default();
    let hash_pass = hash_password(&password)?;

    let user = state
        .users()
        .create(payload, hash_pass, role, UserStatus::Pending)
        .await?;
    let user_id = user_id_string(&user)?;

    let otp = generate_otp();
    let expires_at = time::now_millis() + OTP_TTL_MS;
    state
        .users()
        .set_verification_otp(&user_id, sha256_hex(&otp), expires_at)
        .await?;
    mailer::send_email(
        &user.email,
        "Verify your account",
        &format!("Your verification code is {}. It expires in one hour.", otp),
    );

    security_log!("INFO", "user_registered", user_id = user_id, email = user.email.clone());
    Ok(created(user, "Account registered"))
}

/// Login with email and password
///
/// 查询后先等固定延迟再判定结果；任何失败都返回同一条 401。
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<AuthTokens>>> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let user = state.users().find_by_email(&email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(user) if user.status != UserStatus::Blocked => user,
        _ => {
            security_log!("WARN", "login_failed", email = email.clone());
            return Err(AppError::invalid_credentials());
        }
    };

    if !verify_password(&password, &user.hash_pass)? {
        security_log!("WARN", "login_failed", email = email.clone());
        return Err(AppError::invalid_credentials());
    }

    let access_token = state
        .jwt_service
        .issue(&user, TokenType::Access)
        .map_err(|e| AppError::internal(e.to_string()))?;
    let refresh_token = state
        .jwt_service
        .issue(&user, TokenType::Refresh)
        .map_err(|e| AppError::internal(e.to_string()))?;

    let user_id = user_id_string(&user)?;
    state
        .users()
        .push_refresh_token(&user_id, sha256_hex(&refresh_token))
        .await?;

    if let Ok(performed_by) = parse_record_id(&user_id) {
        state.activity_service.log(ActivityWrite {
            action: ActivityAction::Login,
            module: "auth".to_string(),
            description: "LOGIN action performed on auth".to_string(),
            performed_by,
            target_id: None,
            target_model: None,
            ip_address: None,
            user_agent: None,
        });
    }
    security_log!("INFO", "login_success", user_id = user_id, email = user.email.clone());

    Ok(ok(
        AuthTokens {
            user,
            access_token,
            refresh_token,
        },
        "Login successful",
    ))
}

/// Exchange a refresh token for a fresh access token
///
/// 除 JWT 本身有效外，其 sha256 摘要还必须在用户的有效名单里。
pub async fn refresh_token(
    State(state): State<ServerState>,
    Json(payload): Json<RefreshRequest>,
) -> AppResult<Json<AppResponse<AccessToken>>> {
    let token = payload
        .refresh_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthorized("Invalid refresh token"))?;

    let claims = state
        .jwt_service
        .verify(&token, TokenType::Refresh)
        .map_err(|e| match e {
            crate::auth::JwtError::ExpiredToken => {
                AppError::unauthorized("Refresh token expired")
            }
            _ => AppError::unauthorized("Invalid refresh token"),
        })?;

    let user = state
        .users()
        .find_by_id(&claims.sub)
        .await?
        .filter(|u| u.status != UserStatus::Blocked)
        .ok_or_else(|| AppError::unauthorized("Invalid refresh token"))?;

    if !user.refresh_tokens.contains(&sha256_hex(&token)) {
        security_log!("WARN", "refresh_rejected", user_id = claims.sub.clone());
        return Err(AppError::unauthorized("Invalid refresh token"));
    }

    let access_token = state
        .jwt_service
        .issue(&user, TokenType::Access)
        .map_err(|e| AppError::internal(e.to_string()))?;

    Ok(ok(AccessToken { access_token }, "Token refreshed"))
}

/// Request a password-reset OTP
pub async fn forgot_password(
    State(state): State<ServerState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    let email = payload
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::validation("Email is required"))?;

    let user = state
        .users()
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    let user_id = user_id_string(&user)?;

    let otp = generate_otp();
    let expires_at = time::now_millis() + OTP_TTL_MS;
    state
        .users()
        .set_reset_otp(&user_id, sha256_hex(&otp), expires_at)
        .await?;
    mailer::send_email(
        &user.email,
        "Password reset code",
        &format!("Your password reset code is {}. It expires in one hour.", otp),
    );

    security_log!("INFO", "reset_otp_issued", user_id = user_id);
    Ok(ok_message("OTP sent"))
}

/// Reset the password with a previously issued OTP
pub async fn reset_password(
    State(state): State<ServerState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    let has = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.trim().is_empty());
    if !has(&payload.email) || !has(&payload.otp) || !has(&payload.new_password) {
        return Err(AppError::validation("All fields are required"));
    }
    let email = payload.email.unwrap_or_default();
    let otp = payload.otp.unwrap_or_default();
    let new_password = payload.new_password.unwrap_or_default();

    let user = state
        .users()
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    let user_id = user_id_string(&user)?;

    let now = time::now_millis();
    let otp_valid = user.reset_otp_hash.as_deref() == Some(sha256_hex(&otp).as_str())
        && user.reset_otp_expires_at.is_some_and(|exp| exp > now);
    if !otp_valid {
        security_log!("WARN", "reset_otp_rejected", user_id = user_id);
        return Err(AppError::validation("Invalid OTP"));
    }

    let hash_pass = hash_password(&new_password)?;
    state.users().reset_password(&user_id, hash_pass).await?;

    security_log!("INFO", "password_reset", user_id = user_id);
    Ok(ok_message("Password reset successful"))
}

/// `GET /auth/me` - the caller's own account, secrets stripped by serde
pub async fn me(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<User>>> {
    let user = state
        .users()
        .find_by_id(&current.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(ok(user, "User fetched"))
}

/// Logout - drop every stored refresh-token digest
pub async fn logout(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<()>>> {
    state.users().clear_refresh_tokens(&current.id).await?;

    if let Ok(performed_by) = parse_record_id(&current.id) {
        state.activity_service.log(ActivityWrite {
            action: ActivityAction::Logout,
            module: "auth".to_string(),
            description: "LOGOUT action performed on auth".to_string(),
            performed_by,
            target_id: None,
            target_model: None,
            ip_address: None,
            user_agent: None,
        });
    }
    security_log!("INFO", "logout", user_id = current.id.clone());

    Ok(ok_message("Logged out"))
}
