//! User Account API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::{CurrentUser, hash_password};
use crate::core::ServerState;
use crate::db::models::{
    ProfileUpdate, User, UserCreate, UserRole, UserStatus, UserUpdate, parse_enum,
};
use crate::db::repository::page_window;
use crate::db::repository::user::{ImageField, UserFilter};
use crate::utils::error::{created, ok};
use crate::utils::{AppError, AppResponse, AppResult, Paged};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub role: Option<String>,
    pub status: Option<String>,
    pub q: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// 图片端点只收 URL 字符串，二进制上传不在范围内
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrl {
    pub url: Option<String>,
}

impl ImageUrl {
    fn into_url(self) -> AppResult<String> {
        self.url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| AppError::validation("Image URL is required"))
    }
}

/// Admin create: account is active immediately, no OTP flow
pub async fn create(
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
    let hash_pass = hash_password(payload.password.as_deref().unwrap_or_default())?;

    let user = state
        .users()
        .create(payload, hash_pass, role, UserStatus::Active)
        .await?;
    Ok(created(user, "User created"))
}

/// List users with filters
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<UserListQuery>,
) -> AppResult<Json<AppResponse<Paged<User>>>> {
    let role = query
        .role
        .as_deref()
        .map(|r| parse_enum::<UserRole>(r, "role"))
        .transpose()
        .map_err(AppError::validation)?;
    let status = query
        .status
        .as_deref()
        .map(|s| parse_enum::<UserStatus>(s, "status"))
        .transpose()
        .map_err(AppError::validation)?;

    let (page, limit, _) = page_window(query.page, query.limit, 10);
    let (users, total) = state
        .users()
        .list(UserFilter {
            role,
            status,
            q: query.q,
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok(ok(Paged::new(users, total, page, limit), "Users fetched"))
}

/// `GET /users/me`
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

/// `PATCH /users/me`
pub async fn update_me(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<ProfileUpdate>,
) -> AppResult<Json<AppResponse<User>>> {
    let user = state.users().update_profile(&current.id, payload).await?;
    Ok(ok(user, "Profile updated"))
}

/// `PATCH /users/me/avatar`
pub async fn set_avatar(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<ImageUrl>,
) -> AppResult<Json<AppResponse<User>>> {
    let url = payload.into_url()?;
    let user = state
        .users()
        .set_image(&current.id, ImageField::Avatar, url)
        .await?;
    Ok(ok(user, "Avatar updated"))
}

/// `PATCH /users/me/cover`
pub async fn set_cover(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<ImageUrl>,
) -> AppResult<Json<AppResponse<User>>> {
    let url = payload.into_url()?;
    let user = state
        .users()
        .set_image(&current.id, ImageField::Cover, url)
        .await?;
    Ok(ok(user, "Cover image updated"))
}

/// Get user by id (admin)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<User>>> {
    let user = state
        .users()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(ok(user, "User fetched"))
}

/// Admin update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<AppResponse<User>>> {
    let role = payload
        .role
        .as_deref()
        .map(|r| parse_enum::<UserRole>(r, "role"))
        .transpose()
        .map_err(AppError::validation)?;
    let status = payload
        .status
        .as_deref()
        .map(|s| parse_enum::<UserStatus>(s, "status"))
        .transpose()
        .map_err(AppError::validation)?;

    let user = state.users().update(&id, payload, role, status).await?;
    Ok(ok(user, "User updated"))
}

/// Admin delete = block. 路径参数可以是 `user:xxx` 也可以是邮箱。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<User>>> {
    let user = if id.contains('@') {
        state.users().block_by_email(&id).await?
    } else {
        state.users().block_by_id(&id).await?
    };
    Ok(ok(user, "User blocked"))
}
