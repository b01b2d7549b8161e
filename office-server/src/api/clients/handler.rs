//! Client Account API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::{CurrentUser, hash_password};
use crate::core::ServerState;
use crate::db::models::{
    Client, ClientCreate, ClientProfileUpdate, ClientUpdate, RecordStatus, parse_enum,
};
use crate::db::repository::client::{ClientFilter, ClientImageField};
use crate::db::repository::page_window;
use crate::utils::error::{created, ok};
use crate::utils::{AppError, AppResponse, AppResult, Paged};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrl {
    pub url: Option<String>,
}

/// 客户账户与 user 账户以 email 关联：自助路由先取登录账户，
/// 再按邮箱找客户记录。
async fn caller_client(state: &ServerState, current: &CurrentUser) -> AppResult<Client> {
    let user = state
        .users()
        .find_by_id(&current.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    state
        .clients()
        .find_by_email(&user.email)
        .await?
        .ok_or_else(|| AppError::not_found("Client profile not found"))
}

fn client_id_string(client: &Client) -> AppResult<String> {
    client
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Client record has no id"))
}

/// Admin create
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ClientCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<Client>>)> {
    let has = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.trim().is_empty());
    if !has(&payload.name) || !has(&payload.email) || !has(&payload.password) {
        return Err(AppError::validation("All fields are required"));
    }

    let hash_pass = hash_password(payload.password.as_deref().unwrap_or_default())?;
    let client = state.clients().create(payload, hash_pass).await?;
    Ok(created(client, "Client created"))
}

/// List clients with filters
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ClientListQuery>,
) -> AppResult<Json<AppResponse<Paged<Client>>>> {
    let status = query
        .status
        .as_deref()
        .map(|s| parse_enum::<RecordStatus>(s, "status"))
        .transpose()
        .map_err(AppError::validation)?;

    let (page, limit, _) = page_window(query.page, query.limit, 10);
    let (clients, total) = state
        .clients()
        .list(ClientFilter {
            q: query.q,
            status,
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok(ok(Paged::new(clients, total, page, limit), "Clients fetched"))
}

/// `GET /clients/me`
pub async fn me(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<Client>>> {
    let client = caller_client(&state, &current).await?;
    Ok(ok(client, "Client fetched"))
}

/// `PATCH /clients/me`
pub async fn update_me(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<ClientProfileUpdate>,
) -> AppResult<Json<AppResponse<Client>>> {
    let client = caller_client(&state, &current).await?;
    let id = client_id_string(&client)?;
    let client = state.clients().update_profile(&id, payload).await?;
    Ok(ok(client, "Profile updated"))
}

/// `PATCH /clients/me/avatar`
pub async fn set_avatar(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<ImageUrl>,
) -> AppResult<Json<AppResponse<Client>>> {
    set_image(state, current, payload, ClientImageField::Avatar, "Avatar updated").await
}

/// `PATCH /clients/me/cover`
pub async fn set_cover(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<ImageUrl>,
) -> AppResult<Json<AppResponse<Client>>> {
    set_image(state, current, payload, ClientImageField::Cover, "Cover image updated").await
}

async fn set_image(
    state: ServerState,
    current: CurrentUser,
    payload: ImageUrl,
    field: ClientImageField,
    message: &str,
) -> AppResult<Json<AppResponse<Client>>> {
    let url = payload
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::validation("Image URL is required"))?;
    let client = caller_client(&state, &current).await?;
    let id = client_id_string(&client)?;
    let client = state.clients().set_image(&id, field, url).await?;
    Ok(ok(client, message))
}

/// Get client by id (admin)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Client>>> {
    let client = state
        .clients()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Client not found"))?;
    Ok(ok(client, "Client fetched"))
}

/// Admin update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ClientUpdate>,
) -> AppResult<Json<AppResponse<Client>>> {
    let status = payload
        .status
        .as_deref()
        .map(|s| parse_enum::<RecordStatus>(s, "status"))
        .transpose()
        .map_err(AppError::validation)?;

    let client = state.clients().update(&id, payload, status).await?;
    Ok(ok(client, "Client updated"))
}

/// Permanent delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Client>>> {
    let client = state.clients().delete(&id).await?;
    Ok(ok(client, "Client deleted"))
}
