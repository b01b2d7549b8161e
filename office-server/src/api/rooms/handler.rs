//! Room API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Room, RoomCreate, RoomStatus, RoomType, RoomUpdate, parse_enum};
use crate::db::repository::room::RoomFilter;
use crate::db::repository::{page_window, parse_record_id};
use crate::utils::error::{created, ok};
use crate::utils::{AppError, AppResponse, AppResult, Paged};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub floor: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAssign {
    pub assigned_to: Option<String>,
}

/// Create a room
pub async fn create(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<RoomCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<Room>>)> {
    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::validation("Room name is required"))?;

    let room_type = payload
        .room_type
        .as_deref()
        .map(|t| parse_enum::<RoomType>(t, "type"))
        .transpose()
        .map_err(AppError::validation)?
        .unwrap_or_default();
    let created_by = parse_record_id(&current.id)?;

    let room = state
        .rooms()
        .create(
            name,
            room_type,
            payload.capacity.unwrap_or(1),
            payload.floor,
            payload.remarks,
            created_by,
        )
        .await?;
    Ok(created(room, "Room created"))
}

/// List rooms with filters
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<RoomListQuery>,
) -> AppResult<Json<AppResponse<Paged<Room>>>> {
    let status = query
        .status
        .as_deref()
        .map(|s| parse_enum::<RoomStatus>(s, "status"))
        .transpose()
        .map_err(AppError::validation)?;
    let room_type = query
        .room_type
        .as_deref()
        .map(|t| parse_enum::<RoomType>(t, "type"))
        .transpose()
        .map_err(AppError::validation)?;

    let (page, limit, _) = page_window(query.page, query.limit, 10);
    let (rooms, total) = state
        .rooms()
        .list(RoomFilter {
            q: query.q,
            status,
            room_type,
            floor: query.floor,
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok(ok(Paged::new(rooms, total, page, limit), "Rooms fetched"))
}

/// Get room by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Room>>> {
    let room = state
        .rooms()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Room not found"))?;
    Ok(ok(room, "Room fetched"))
}

/// Update a room. 改名时重查重名。
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RoomUpdate>,
) -> AppResult<Json<AppResponse<Room>>> {
    let thing = parse_record_id(&id)?;
    let room_type = payload
        .room_type
        .as_deref()
        .map(|t| parse_enum::<RoomType>(t, "type"))
        .transpose()
        .map_err(AppError::validation)?;
    let status = payload
        .status
        .as_deref()
        .map(|s| parse_enum::<RoomStatus>(s, "status"))
        .transpose()
        .map_err(AppError::validation)?;

    if let Some(name) = &payload.name
        && state.rooms().name_taken(name, Some(&thing)).await?
    {
        return Err(AppError::conflict("Room with this name already exists"));
    }

    let room = state
        .rooms()
        .update(
            &thing,
            payload.name,
            room_type,
            payload.capacity,
            payload.floor,
            status,
            payload.remarks,
        )
        .await?;
    Ok(ok(room, "Room updated"))
}

/// `PATCH /rooms/{id}/assign`
pub async fn assign(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RoomAssign>,
) -> AppResult<Json<AppResponse<Room>>> {
    let thing = parse_record_id(&id)?;
    let assigned_to = payload
        .assigned_to
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| AppError::validation("assignedTo is required"))?;

    let room = state.rooms().assign(&thing, assigned_to).await?;
    Ok(ok(room, "Room assigned"))
}

/// `PATCH /rooms/{id}/release`
pub async fn release(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Room>>> {
    let thing = parse_record_id(&id)?;
    let room = state.rooms().release(&thing).await?;
    Ok(ok(room, "Room released"))
}

/// Soft delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Room>>> {
    let thing = parse_record_id(&id)?;
    let room = state.rooms().soft_delete(&thing).await?;
    Ok(ok(room, "Room deleted"))
}
