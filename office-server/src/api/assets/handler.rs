//! Asset API Handlers
//!
//! 指派目标是 Employee/Project/Room 闭集；指派前先校验目标存在，
//! 目标缺失时返回 404 且资产不变。

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    Asset, AssetAssign, AssetAssignee, AssetCategory, AssetCreate, AssetStatus, AssetUpdate,
    parse_enum,
};
use crate::db::repository::asset::{AssetFilter, AssetWrite};
use crate::db::repository::{page_window, parse_record_id};
use crate::utils::error::{created, ok};
use crate::utils::{AppError, AppResponse, AppResult, Paged};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// Create an asset
pub async fn create(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<AssetCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<Asset>>)> {
    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::validation("Asset name is required"))?;
    let category: AssetCategory = payload
        .category
        .as_deref()
        .map(|c| parse_enum(c, "category"))
        .transpose()
        .map_err(AppError::validation)?
        .ok_or_else(|| AppError::validation("Category is required"))?;
    let serial_number = payload
        .serial_number
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::validation("serialNumber is required"))?;
    let location = payload
        .location
        .as_deref()
        .map(parse_record_id)
        .transpose()?;
    let created_by = parse_record_id(&current.id)?;

    let asset = state
        .assets()
        .create(
            AssetWrite {
                name,
                category,
                serial_number,
                purchase_date: payload.purchase_date,
                warranty_expiry: payload.warranty_expiry,
                cost: payload.cost.unwrap_or(0.0),
                location,
                remarks: payload.remarks,
            },
            created_by,
        )
        .await?;
    Ok(created(asset, "Asset created"))
}

/// List assets with filters
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<AssetListQuery>,
) -> AppResult<Json<AppResponse<Paged<Asset>>>> {
    let status = query
        .status
        .as_deref()
        .map(|s| parse_enum::<AssetStatus>(s, "status"))
        .transpose()
        .map_err(AppError::validation)?;
    let category = query
        .category
        .as_deref()
        .map(|c| parse_enum::<AssetCategory>(c, "category"))
        .transpose()
        .map_err(AppError::validation)?;

    let (page, limit, _) = page_window(query.page, query.limit, 10);
    let (assets, total) = state
        .assets()
        .list(AssetFilter {
            q: query.q,
            status,
            category,
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok(ok(Paged::new(assets, total, page, limit), "Assets fetched"))
}

/// Get asset by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Asset>>> {
    let asset = state
        .assets()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Asset not found"))?;
    Ok(ok(asset, "Asset fetched"))
}

/// Update an asset
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AssetUpdate>,
) -> AppResult<Json<AppResponse<Asset>>> {
    let thing = parse_record_id(&id)?;
    let category = payload
        .category
        .as_deref()
        .map(|c| parse_enum::<AssetCategory>(c, "category"))
        .transpose()
        .map_err(AppError::validation)?;
    let status = payload
        .status
        .as_deref()
        .map(|s| parse_enum::<AssetStatus>(s, "status"))
        .transpose()
        .map_err(AppError::validation)?;
    let location = payload
        .location
        .as_deref()
        .map(parse_record_id)
        .transpose()?;

    let asset = state
        .assets()
        .update(
            &thing,
            payload.name,
            category,
            payload.purchase_date,
            payload.warranty_expiry,
            payload.cost,
            status,
            location,
            payload.remarks,
        )
        .await?;
    Ok(ok(asset, "Asset updated"))
}

/// `PATCH /assets/{id}/assign` - 目标存在才落盘
pub async fn assign(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AssetAssign>,
) -> AppResult<Json<AppResponse<Asset>>> {
    let thing = parse_record_id(&id)?;
    state
        .assets()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Asset not found"))?;

    let target_id = payload
        .assigned_to
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::validation("assignedTo is required"))?;
    let model = payload
        .assigned_to_model
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::validation("assignedToModel is required"))?;

    let assignee = match model.as_str() {
        "Employee" => {
            state
                .employees()
                .find_by_id(&target_id)
                .await?
                .ok_or_else(|| AppError::not_found("Employee not found"))?;
            AssetAssignee::Employee { id: target_id }
        }
        "Project" => {
            state
                .projects()
                .find_by_id(&target_id)
                .await?
                .ok_or_else(|| AppError::not_found("Project not found"))?;
            AssetAssignee::Project { id: target_id }
        }
        "Room" => {
            state
                .rooms()
                .find_by_id(&target_id)
                .await?
                .ok_or_else(|| AppError::not_found("Room not found"))?;
            AssetAssignee::Room { id: target_id }
        }
        other => {
            return Err(AppError::validation(format!(
                "Invalid assignedToModel: {}",
                other
            )));
        }
    };

    let asset = state.assets().assign(&thing, assignee).await?;
    Ok(ok(asset, "Asset assigned"))
}

/// `PATCH /assets/{id}/unassign`
pub async fn unassign(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Asset>>> {
    let thing = parse_record_id(&id)?;
    let asset = state.assets().unassign(&thing).await?;
    Ok(ok(asset, "Asset unassigned"))
}

/// `PATCH /assets/{id}/maintenance`
pub async fn maintenance(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Asset>>> {
    let thing = parse_record_id(&id)?;
    let asset = state
        .assets()
        .set_status(&thing, AssetStatus::Maintenance)
        .await?;
    Ok(ok(asset, "Asset moved to maintenance"))
}

/// `DELETE /assets/{id}` - 退役而非物理删除
pub async fn retire(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Asset>>> {
    let thing = parse_record_id(&id)?;
    let asset = state
        .assets()
        .set_status(&thing, AssetStatus::Retired)
        .await?;
    Ok(ok(asset, "Asset retired"))
}
